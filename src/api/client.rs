//
//  sysdig-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Sysdig API
//!
//! [`Client`] composes an immutable [`ClientConfig`] with a [`Requester`]. Every
//! resource capability trait (teams, users, policies, ...) is implemented on
//! top of the three generic entry points defined here:
//!
//! - [`Client::send`]: issue the request and check the status allow-list
//! - [`Client::fetch`]: `send`, then unmarshal the body
//! - [`Client::execute`]: `send`, discarding the body
//!
//! ## Features
//!
//! - Pluggable authentication (static bearer token or IBM IAM)
//! - JSON serialization/deserialization
//! - Per-endpoint success codes
//! - Error messages extracted from the response body

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ibm::IbmRequester;
use super::marshal::{decode, error_from_response, marshal};
use super::requester::{BearerRequester, Requester};
use crate::config::{ClientConfig, IbmConfig};
use crate::error::Result;

/// Marker header sent on endpoints that track the calling integration.
pub const PROVIDER_HEADER: HeaderName = HeaderName::from_static("sysdig-provider");

/// Value of [`PROVIDER_HEADER`].
pub const PROVIDER_NAME: &str = "Terraform";

/// A single API call: method, path, optional JSON body, extra headers and
/// the status codes that count as success.
///
/// # Example
///
/// ```rust
/// use reqwest::{Method, StatusCode};
/// use sysdig_client::api::ApiRequest;
///
/// let request = ApiRequest::get("/api/teams/12").expect(&[StatusCode::OK]);
/// assert_eq!(request.method(), &Method::GET);
/// assert_eq!(request.path(), "/api/teams/12");
/// ```
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
    expect: &'static [StatusCode],
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            headers: HeaderMap::new(),
            expect: &[StatusCode::OK],
        }
    }

    /// A `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    /// A `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    /// A `POST` request with a JSON body.
    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self::new(Method::POST, path, Some(marshal(body)?)))
    }

    /// A `PUT` request with a JSON body.
    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self::new(Method::PUT, path, Some(marshal(body)?)))
    }

    /// Sets the status codes that count as success. Defaults to `200 OK`.
    pub fn expect(mut self, expect: &'static [StatusCode]) -> Self {
        self.expect = expect;
        self
    }

    /// Adds the `Sysdig-Provider` marker header.
    pub fn with_provider_marker(mut self) -> Self {
        self.headers
            .insert(PROVIDER_HEADER, HeaderValue::from_static(PROVIDER_NAME));
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the API base URL.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The Sysdig API client.
///
/// Cheap to clone: the configuration and requester are shared.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use sysdig_client::api::{Client, TeamsApi};
/// use sysdig_client::config::ClientConfig;
///
/// # async fn example() -> sysdig_client::Result<()> {
/// let config = ClientConfig::builder("https://secure.sysdig.com")
///     .token("my-api-token")
///     .build()?;
/// let client = Client::with_token(config)?;
///
/// for team in client.list_teams().await? {
///     println!("{}", team.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    requester: Arc<dyn Requester>,
}

impl Client {
    /// Creates a client from a config and any requester implementation.
    pub fn new(config: ClientConfig, requester: Arc<dyn Requester>) -> Self {
        Self {
            config: Arc::new(config),
            requester,
        }
    }

    /// Creates a client authenticating with the config's bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) when no token is set.
    pub fn with_token(config: ClientConfig) -> Result<Self> {
        let requester = BearerRequester::new(config.clone())?;
        Ok(Self::new(config, Arc::new(requester)))
    }

    /// Creates a client authenticating through IBM Cloud IAM.
    pub fn with_ibm(config: ClientConfig, ibm: IbmConfig) -> Result<Self> {
        let requester = IbmRequester::new(config.clone(), ibm)?;
        Ok(Self::new(config, Arc::new(requester)))
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves an API path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url(), path)
    }

    /// Sends a request and checks the status against its allow-list.
    ///
    /// # Errors
    ///
    /// - Transport failures from the requester
    /// - [`Error::Api`](crate::Error::Api) for any status outside the allow-list
    pub async fn send(&self, request: ApiRequest) -> Result<Response> {
        let url = self.url(&request.path);
        let method = request.method.clone();

        let response = self
            .requester
            .request_with(request.method, &url, request.body, request.headers)
            .await?;

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url, status);

        if request.expect.contains(&status) {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Sends a request and unmarshals the response body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        decode(self.send(request).await?).await
    }

    /// Sends a request and discards the body, returning the status.
    pub async fn execute(&self, request: ApiRequest) -> Result<StatusCode> {
        Ok(self.send(request).await?.status())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.config.url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_defaults() {
        let request = ApiRequest::get("/api/users/light");
        assert_eq!(request.expect, &[StatusCode::OK]);
        assert!(request.body.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_api_request_post_marshals_body() {
        let request = ApiRequest::post("/api/teams", &serde_json::json!({"name": "ops"}))
            .unwrap()
            .expect(&[StatusCode::CREATED])
            .with_provider_marker();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.body.as_deref(), Some(br#"{"name":"ops"}"#.as_slice()));
        assert_eq!(request.expect, &[StatusCode::CREATED]);
        assert_eq!(request.headers.get("sysdig-provider").unwrap(), "Terraform");
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ClientConfig::builder("https://secure.sysdig.com/")
            .token("t")
            .build()
            .unwrap();
        let client = Client::with_token(config).unwrap();
        assert_eq!(
            client.url("/api/v2/policies/3"),
            "https://secure.sysdig.com/api/v2/policies/3"
        );
    }
}
