//
//  sysdig-client
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Types
//!
//! A single error enum covers every failure a [`Client`](crate::api::Client)
//! call can produce. There are two broad levels:
//!
//! - **Transport errors** (`Transport`, `Http`) surfaced verbatim from the
//!   underlying HTTP stack
//! - **API errors** (`Api`) carrying the human-readable message extracted from
//!   the response body (see [`error_message`](crate::api::marshal::error_message))
//!
//! A handful of per-resource "not found" sentinels let callers tell absence
//! apart from failure without inspecting status codes.
//!
//! ## Example
//!
//! ```rust
//! use sysdig_client::Error;
//!
//! let err = Error::GroupMappingNotFound(42);
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "group mapping 42 not found");
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Sysdig client.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be delivered (connection, TLS, retries exhausted).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status outside the endpoint's allow-list.
    ///
    /// The display text is the message extracted from the body, or the
    /// status line when nothing readable was found.
    #[error("{message}")]
    Api {
        /// The HTTP status returned by the API.
        status: StatusCode,
        /// The extracted, human-readable message.
        message: String,
    },

    /// A request value could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A response body was not valid JSON for the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An update or delete was attempted on a record without an ID.
    #[error("{0} has no ID")]
    MissingId(&'static str),

    /// An extra header name or value is not a valid HTTP header.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// The IBM IAM token could not be obtained.
    #[error("failed to obtain IBM IAM token: {0}")]
    TokenRefresh(String),

    /// No user with the given e-mail exists.
    #[error("user '{0}' not found")]
    UserNotFound(String),

    /// No group mapping with the given ID exists.
    #[error("group mapping {0} not found")]
    GroupMappingNotFound(i64),

    /// No notification channel with the given ID or name exists.
    #[error("notification channel '{0}' not found")]
    NotificationChannelNotFound(String),

    /// No posture zone with the given ID exists.
    #[error("posture zone '{0}' not found")]
    PostureZoneNotFound(String),
}

impl Error {
    /// Returns `true` when the error means the resource does not exist.
    ///
    /// This covers the explicit sentinels as well as any API error that
    /// came back as `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::UserNotFound(_)
            | Self::GroupMappingNotFound(_)
            | Self::NotificationChannelNotFound(_)
            | Self::PostureZoneNotFound(_) => true,
            Self::Api { status, .. } => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = Error::Api {
            status: StatusCode::BAD_REQUEST,
            message: "bad request, field X".to_string(),
        };
        assert_eq!(err.to_string(), "bad request, field X");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::UserNotFound("a@b.c".into()).is_not_found());
        assert!(Error::PostureZoneNotFound("7".into()).is_not_found());
        assert!(Error::Api {
            status: StatusCode::NOT_FOUND,
            message: "404 Not Found".into(),
        }
        .is_not_found());
        assert!(!Error::Api {
            status: StatusCode::CONFLICT,
            message: "conflict".into(),
        }
        .is_not_found());
        assert!(!Error::Config("x".into()).is_not_found());
    }
}
