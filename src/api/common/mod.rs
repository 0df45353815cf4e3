//
//  sysdig-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for all Sysdig resource families
//!
//! # Overview
//!
//! - [`envelope!`](crate::api::common::envelope) - declares a typed
//!   `{"<key>": payload}` wrapper once per resource
//! - Status allow-lists shared by resource endpoints
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Envelopes
//!
//! Several endpoints wrap their payload in a single top-level key, e.g.
//! `{"team": {...}}`. Each resource declares its wrapper with the macro so
//! the key lives in exactly one place:
//!
//! ```rust,ignore
//! envelope!(
//!     /// `{"team": Team}`
//!     TeamEnvelope, "team", Team
//! );
//!
//! let wrapped = TeamEnvelope::from(team);
//! let team = wrapped.into_inner();
//! ```

use reqwest::StatusCode;

mod pagination;

pub use pagination::*;

/// Declares a single-key JSON envelope around a payload type.
macro_rules! envelope {
    ($(#[$meta:meta])* $name:ident, $key:literal, $inner:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            #[serde(rename = $key)]
            pub inner: $inner,
        }

        impl $name {
            /// Unwraps the payload.
            pub fn into_inner(self) -> $inner {
                self.inner
            }
        }

        impl From<$inner> for $name {
            fn from(inner: $inner) -> Self {
                Self { inner }
            }
        }
    };
}

pub(crate) use envelope;

/// `200 OK`
pub const OK: &[StatusCode] = &[StatusCode::OK];

/// `201 Created`
pub const CREATED: &[StatusCode] = &[StatusCode::CREATED];

/// `200 OK` or `201 Created`
pub const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];

/// `204 No Content`
pub const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];

/// `200 OK` or `204 No Content`
pub const OK_OR_NO_CONTENT: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Idempotent delete: `200`, `204`, or `404` (already gone).
pub const DELETED_OR_GONE: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::NO_CONTENT,
    StatusCode::NOT_FOUND,
];

/// `200 OK` or `404 Not Found`, for lookups that map 404 onto a sentinel.
pub const OK_OR_NOT_FOUND: &[StatusCode] = &[StatusCode::OK, StatusCode::NOT_FOUND];

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Payload {
        name: String,
    }

    envelope!(PayloadEnvelope, "payloadKey", Payload);

    #[test]
    fn test_envelope_uses_declared_key() {
        let wrapped = PayloadEnvelope::from(Payload {
            name: "x".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&wrapped).unwrap(),
            r#"{"payloadKey":{"name":"x"}}"#
        );

        let parsed: PayloadEnvelope = serde_json::from_str(r#"{"payloadKey":{"name":"y"}}"#).unwrap();
        assert_eq!(parsed.into_inner().name, "y");
    }
}
