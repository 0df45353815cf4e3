//
//  sysdig-client
//  api/requester.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Requester
//!
//! The [`Requester`] trait is the single seam between resource code and the
//! network: given a method, a URL and an optional body it returns the raw
//! response. Authentication lives in the implementations:
//!
//! - [`BearerRequester`]: attaches a fixed bearer token
//! - [`IbmRequester`](super::ibm::IbmRequester): exchanges an IBM API key for
//!   a cached IAM token
//!
//! Both share the transport built by [`build_transport`], which retries
//! transient failures with exponential backoff.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Issues authenticated HTTP requests.
///
/// Dropping the returned future cancels the request.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Sends a request with additional per-call headers.
    ///
    /// Per-call headers are applied last and override configured ones.
    async fn request_with(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Response>;

    /// Sends a request.
    async fn request(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<Response> {
        self.request_with(method, url, body, HeaderMap::new()).await
    }
}

/// Builds the HTTP transport shared by all requesters.
///
/// Transient failures (connection errors, 5xx, 429) are retried up to
/// `config.max_retries()` times with exponential backoff.
pub fn build_transport(config: &ClientConfig) -> Result<ClientWithMiddleware> {
    let http = reqwest::Client::builder()
        .user_agent(format!("sysdig-client/{}", crate::VERSION))
        .danger_accept_invalid_certs(config.insecure())
        .build()?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries());

    Ok(ClientBuilder::new(http)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Sends `method url` through the transport with the given headers and body.
pub(crate) async fn dispatch(
    transport: &ClientWithMiddleware,
    method: Method,
    url: &str,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
) -> Result<Response> {
    let mut request = transport.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.body(body);
    }
    Ok(request.send().await?)
}

/// Merges configured extra headers and per-call headers onto `base`.
///
/// A per-call header replaces any earlier value of the same name; all of its
/// own values are kept.
pub(crate) fn merge_headers(base: &mut HeaderMap, config: &ClientConfig, per_call: HeaderMap) {
    for (name, value) in config.extra_headers() {
        base.insert(name.clone(), value.clone());
    }
    let mut current: Option<HeaderName> = None;
    for (name, value) in per_call {
        match name {
            Some(name) => {
                base.insert(name.clone(), value);
                current = Some(name);
            }
            // Further values of the previous name.
            None => {
                if let Some(name) = &current {
                    base.append(name.clone(), value);
                }
            }
        }
    }
}

/// Builds an `Authorization: Bearer <token>` value.
pub(crate) fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| Error::InvalidHeader(AUTHORIZATION.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Requester that authenticates with a static bearer token.
pub struct BearerRequester {
    config: ClientConfig,
    transport: ClientWithMiddleware,
}

impl BearerRequester {
    /// Creates a requester for a config that carries a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the config has no token.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.token().is_none() {
            return Err(Error::Config("a bearer token is required".to_string()));
        }
        let transport = build_transport(&config)?;
        Ok(Self { config, transport })
    }

    /// Builds the header set for one request.
    pub(crate) fn headers(&self, per_call: HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.config.token() {
            headers.insert(AUTHORIZATION, bearer(token)?);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merge_headers(&mut headers, &self.config, per_call);
        Ok(headers)
    }
}

#[async_trait]
impl Requester for BearerRequester {
    async fn request_with(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Response> {
        let headers = self.headers(headers)?;
        dispatch(&self.transport, method, url, body, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::builder("https://example.com")
            .token("tok")
            .extra_header("X-Extra", "one")
            .extra_header("X-Override", "config")
            .build()
            .unwrap()
    }

    #[test]
    fn test_requires_token() {
        let config = ClientConfig::builder("https://example.com").build().unwrap();
        assert!(matches!(BearerRequester::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_headers_include_auth_and_extras() {
        let requester = BearerRequester::new(config()).unwrap();
        let headers = requester.headers(HeaderMap::new()).unwrap();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("x-extra").unwrap(), "one");
    }

    #[test]
    fn test_per_call_headers_win() {
        let requester = BearerRequester::new(config()).unwrap();
        let mut per_call = HeaderMap::new();
        per_call.insert(
            HeaderName::from_static("x-override"),
            HeaderValue::from_static("call"),
        );

        let headers = requester.headers(per_call).unwrap();
        assert_eq!(headers.get("x-override").unwrap(), "call");
    }

    #[test]
    fn test_per_call_header_keeps_every_value() {
        let mut base = HeaderMap::new();
        let mut per_call = HeaderMap::new();
        let name = HeaderName::from_static("x-override");
        per_call.append(name.clone(), HeaderValue::from_static("first"));
        per_call.append(name.clone(), HeaderValue::from_static("second"));
        per_call.insert(HeaderName::from_static("x-single"), HeaderValue::from_static("one"));

        merge_headers(&mut base, &config(), per_call);

        let values: Vec<_> = base.get_all(&name).iter().collect();
        assert_eq!(values, ["first", "second"]);
        assert_eq!(base.get("x-single").unwrap(), "one");
        assert_eq!(base.get("x-extra").unwrap(), "one");
    }
}
