//
//  sysdig-client
//  api/marshal.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Transcoding and Error Extraction
//!
//! Generic helpers used by every resource module:
//!
//! - [`marshal`] / [`unmarshal`]: serde_json encode/decode mapped onto
//!   [`Error::Encode`] / [`Error::Decode`]
//! - [`decode`]: reads a whole response body and unmarshals it
//! - [`error_message`] / [`error_from_response`]: turn a failed response into
//!   a readable message
//!
//! ## Error Envelope
//!
//! Sysdig reports errors in a loosely shaped envelope:
//!
//! ```json
//! {"message": "bad request", "errors": [{"reason": "invalid", "message": "field X"}]}
//! ```
//!
//! The extractor collects the top-level `message` followed by each entry's
//! `reason` and `message` and joins them with `", "`. Anything it cannot read
//! falls back to the HTTP status line.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Serializes a request value to a JSON body.
pub fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::Encode)
}

/// Deserializes a JSON body into `T`.
pub fn unmarshal<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(Error::Decode)
}

/// Reads the whole response body and deserializes it into `T`.
///
/// The response is consumed, which releases the connection.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    unmarshal(&body)
}

/// Extracts a human-readable message from an error response body.
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use sysdig_client::api::marshal::error_message;
///
/// let body = br#"{"message":"bad request","errors":[{"reason":"invalid","message":"field X"}]}"#;
/// assert_eq!(
///     error_message(StatusCode::BAD_REQUEST, body),
///     "bad request, invalid, field X"
/// );
///
/// assert_eq!(
///     error_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>"),
///     "500 Internal Server Error"
/// );
/// ```
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return status.to_string();
    };

    let mut parts: Vec<&str> = Vec::new();

    if let Some(message) = json.get("message").and_then(Value::as_str) {
        parts.push(message);
    }

    if let Some(errors) = json.get("errors").and_then(Value::as_array) {
        for error in errors {
            for field in ["reason", "message"] {
                if let Some(text) = error.get(field).and_then(Value::as_str) {
                    parts.push(text);
                }
            }
        }
    }

    if parts.is_empty() {
        status.to_string()
    } else {
        parts.join(", ")
    }
}

/// Consumes a failed response and turns it into [`Error::Api`].
pub async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    Error::Api {
        status,
        message: error_message(status, &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_error_message_joins_all_parts() {
        let body = br#"{"message":"bad request","errors":[{"reason":"invalid","message":"field X"}]}"#;
        let message = error_message(StatusCode::BAD_REQUEST, body);
        assert_eq!(message, "bad request, invalid, field X");
    }

    #[test]
    fn test_error_message_errors_only() {
        let body = br#"{"errors":[{"reason":"Not found","message":"team 4 does not exist"},{"message":"second"}]}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Not found, team 4 does not exist, second"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status_line() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, b"upstream timed out"),
            "502 Bad Gateway"
        );
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, br#"{"timestamp":1}"#),
            "403 Forbidden"
        );
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, b""), "401 Unauthorized");
    }

    #[test]
    fn test_error_message_skips_non_string_fields() {
        let body = br#"{"message":null,"errors":[{"reason":42,"message":"kept"}]}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "kept");
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        id: i64,
        display_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    #[test]
    fn test_marshal_roundtrip() {
        let value = Sample {
            id: 7,
            display_name: "ops".to_string(),
            note: Some("n".to_string()),
        };
        let body = marshal(&value).unwrap();
        assert_eq!(
            String::from_utf8(body.clone()).unwrap(),
            r#"{"id":7,"displayName":"ops","note":"n"}"#
        );
        assert_eq!(unmarshal::<Sample>(&body).unwrap(), value);
    }

    #[test]
    fn test_unmarshal_rejects_malformed_json() {
        let err = unmarshal::<Sample>(b"{\"id\":").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
