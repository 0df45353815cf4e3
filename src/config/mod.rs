//
//  sysdig-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module holds the typed configuration consumed by the API client, plus
//! the TOML/environment layer used by the CLI to produce it.
//!
//! ## Overview
//!
//! - [`ClientConfig`]: base URL, bearer token, TLS-insecure flag, extra static
//!   headers and the transport retry budget. Immutable once built.
//! - [`IbmConfig`]: credentials for IBM Cloud IAM authentication.
//! - [`Settings`]: the on-disk `config.toml` merged with `SDC_*` environment
//!   variables.
//!
//! ## Usage
//!
//! ```rust
//! use sysdig_client::config::ClientConfig;
//!
//! let config = ClientConfig::builder("https://secure.sysdig.com/")
//!     .token("my-api-token")
//!     .extra_header("X-Team", "platform")
//!     .build()?;
//!
//! assert_eq!(config.url(), "https://secure.sysdig.com");
//! assert_eq!(config.token(), Some("my-api-token"));
//! # Ok::<(), sysdig_client::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Config file and environment loading

mod file;

pub use file::*;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Default number of transport-level retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Default IBM Cloud IAM endpoint.
pub const DEFAULT_IBM_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Connection settings shared by every request a client makes.
///
/// A `ClientConfig` can only be created through [`ClientConfig::builder`],
/// which validates the URL and the extra headers up front. There are no
/// setters; a client that needs different settings gets a new config.
///
/// # Example
///
/// ```rust
/// use sysdig_client::config::ClientConfig;
///
/// let config = ClientConfig::builder("https://app.sysdigcloud.com")
///     .token("abc")
///     .insecure(true)
///     .max_retries(0)
///     .build()?;
///
/// assert!(config.insecure());
/// assert_eq!(config.max_retries(), 0);
/// # Ok::<(), sysdig_client::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    url: String,
    token: Option<String>,
    insecure: bool,
    extra_headers: HeaderMap,
    max_retries: u32,
}

impl ClientConfig {
    /// Starts building a configuration for the given API base URL.
    pub fn builder(url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            url: url.into(),
            token: None,
            insecure: false,
            extra_headers: Vec::new(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// The API base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The static bearer token, if one was configured.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether TLS certificate verification is disabled.
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    /// Headers attached to every request.
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// Maximum number of transport retries on transient failures.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    url: String,
    token: Option<String>,
    insecure: bool,
    extra_headers: Vec<(String, String)>,
    max_retries: u32,
}

impl ClientConfigBuilder {
    /// Sets the static bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Disables TLS certificate verification when `true`.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Adds a header sent with every request.
    pub fn extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Sets the transport retry budget.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Validates the settings and produces the immutable configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the URL is not an absolute `http`/`https` URL or
    ///   the token is empty
    /// - [`Error::InvalidHeader`] if an extra header name or value is invalid
    pub fn build(self) -> Result<ClientConfig> {
        let parsed = url::Url::parse(self.url.trim())
            .map_err(|e| Error::Config(format!("invalid URL '{}': {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        if matches!(self.token.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(Error::Config("token must not be empty".to_string()));
        }

        let mut extra_headers = HeaderMap::new();
        for (name, value) in &self.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.clone()))?;
            extra_headers.insert(header_name, header_value);
        }

        Ok(ClientConfig {
            url: self.url.trim().trim_end_matches('/').to_string(),
            token: self.token,
            insecure: self.insecure,
            extra_headers,
            max_retries: self.max_retries,
        })
    }
}

/// Credentials for IBM Cloud IAM authentication.
///
/// The API key is exchanged for a short-lived access token at
/// `<iam_url>/identity/token`; see [`IbmRequester`](crate::api::ibm::IbmRequester).
#[derive(Debug, Clone)]
pub struct IbmConfig {
    /// IBM Cloud API key.
    pub api_key: String,
    /// Sysdig instance GUID, sent as the `IBMInstanceID` header.
    pub instance_id: String,
    /// IAM base URL.
    pub iam_url: String,
    /// Optional team to scope requests to, sent as `SysdigTeamID`.
    pub team_id: Option<i64>,
}

impl IbmConfig {
    /// Creates IBM credentials against the default IAM endpoint.
    pub fn new(api_key: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            instance_id: instance_id.into(),
            iam_url: DEFAULT_IBM_IAM_URL.to_string(),
            team_id: None,
        }
    }

    /// Overrides the IAM endpoint.
    pub fn with_iam_url(mut self, iam_url: impl Into<String>) -> Self {
        self.iam_url = iam_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Scopes requests to a team.
    pub fn with_team_id(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ClientConfig::builder("https://secure.sysdig.com/")
            .build()
            .unwrap();
        assert_eq!(config.url(), "https://secure.sysdig.com");
        assert_eq!(config.token(), None);
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
        assert!(!config.insecure());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(matches!(
            ClientConfig::builder("not a url").build(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::builder("ftp://example.com").build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder_rejects_empty_token() {
        assert!(matches!(
            ClientConfig::builder("https://example.com").token("  ").build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder_parses_extra_headers() {
        let config = ClientConfig::builder("https://example.com")
            .extra_header("X-Custom", "value")
            .build()
            .unwrap();
        assert_eq!(config.extra_headers().get("x-custom").unwrap(), "value");

        let err = ClientConfig::builder("https://example.com")
            .extra_header("bad header", "value")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(name) if name == "bad header"));
    }

    #[test]
    fn test_ibm_config_defaults() {
        let ibm = IbmConfig::new("key", "instance");
        assert_eq!(ibm.iam_url, DEFAULT_IBM_IAM_URL);
        assert_eq!(ibm.team_id, None);

        let ibm = ibm.with_iam_url("http://localhost:1234/").with_team_id(9);
        assert_eq!(ibm.iam_url, "http://localhost:1234");
        assert_eq!(ibm.team_id, Some(9));
    }
}
