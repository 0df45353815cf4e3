//
//  sysdig-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Sysdig Monitor and Secure
//! REST APIs.
//!
//! ## Architecture
//!
//! - [`requester`]: The transport seam. [`BearerRequester`] signs requests
//!   with a static API token
//! - [`ibm`]: [`IbmRequester`], which trades an IBM Cloud API key for a
//!   cached IAM access token
//! - [`marshal`]: JSON encode/decode and error message extraction
//! - [`client`]: [`Client`] and [`ApiRequest`], the entry points every
//!   resource call goes through
//! - [`common`]: Envelopes, status allow-lists and pagination
//! - [`platform`], [`monitor`], [`secure`]: Resource types and the
//!   capability traits implemented on [`Client`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sysdig_client::api::{Client, UsersApi};
//! use sysdig_client::config::ClientConfig;
//!
//! # async fn example() -> sysdig_client::Result<()> {
//! let config = ClientConfig::builder("https://secure.sysdig.com")
//!     .token("my-api-token")
//!     .build()?;
//! let client = Client::with_token(config)?;
//!
//! let user = client.get_user_by_email("jane@example.com").await?;
//! println!("{:?}", user.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`crate::Result`]. Unexpected statuses become
//! [`Error::Api`](crate::Error::Api) carrying the message found in the
//! response body; lookups with a dedicated sentinel (users, group mappings,
//! notification channels, posture zones) report `404` through it instead.

pub mod client;
pub mod common;
pub mod ibm;
pub mod marshal;
pub mod requester;

pub mod monitor;
pub mod platform;
pub mod secure;

pub use client::{ApiRequest, Client};
pub use ibm::IbmRequester;
pub use requester::{BearerRequester, Requester};

pub use monitor::NotificationChannelsApi;
pub use platform::{GroupMappingsApi, IpFiltersApi, TeamsApi, UsersApi};
pub use secure::{PoliciesApi, PostureZonesApi, RulesApi};
