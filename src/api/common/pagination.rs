//
//  sysdig-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Sysdig platform API responses
//!
//! The `/platform/v1` endpoints return list results as:
//!
//! ```json
//! {"page": {"total": 2, "prev": null, "next": null}, "data": [...]}
//! ```
//!
//! The client requests a single page of [`PAGE_SIZE`] items and does not
//! follow cursors.

use serde::{Deserialize, Serialize};

/// Fixed page size requested by list operations.
pub const PAGE_SIZE: usize = 100;

/// A single page of results from a platform endpoint.
///
/// # Example
///
/// ```rust
/// use sysdig_client::api::common::Page;
///
/// let json = r#"{"page": {"total": 1, "next": "abc"}, "data": [1]}"#;
/// let page: Page<i64> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.data, vec![1]);
/// assert_eq!(page.page.next.as_deref(), Some("abc"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Cursor and total count.
    #[serde(default)]
    pub page: PageInfo,

    /// Items in this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Page metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,

    /// Cursor for the previous page.
    #[serde(default)]
    pub prev: Option<String>,

    /// Cursor for the next page.
    #[serde(default)]
    pub next: Option<String>,
}
