//
//  sysdig-client
//  api/ibm.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # IBM Cloud IAM Requester
//!
//! Sysdig instances hosted on IBM Cloud authenticate with a short-lived IAM
//! access token instead of a static API token. [`IbmRequester`] exchanges the
//! configured API key for a token, caches it until its expiration timestamp,
//! and refreshes it transparently.
//!
//! ## Token Lifecycle
//!
//! ```text
//! empty/expired ──lock──► re-check ──expired──► POST /identity/token ──► store ──► unlock
//!                             │                                              │
//!                             └──────────── still valid ─────────────────────┴──► attach headers
//! ```
//!
//! The lock is held only for the check-refresh-store sequence, so concurrent
//! callers racing on an expired token produce exactly one refresh call. The
//! authenticated request itself runs without the lock.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::marshal::{error_message, unmarshal};
use super::requester::{bearer, build_transport, dispatch, merge_headers, Requester};
use crate::config::{ClientConfig, IbmConfig};
use crate::error::{Error, Result};

/// Grant type for exchanging an API key at the IAM token endpoint.
pub const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Path of the IAM token endpoint, relative to the IAM base URL.
pub const IAM_TOKEN_PATH: &str = "/identity/token";

/// Header carrying the Sysdig instance GUID.
pub const INSTANCE_ID_HEADER: HeaderName = HeaderName::from_static("ibminstanceid");

/// Header carrying the team a request is scoped to.
pub const TEAM_ID_HEADER: HeaderName = HeaderName::from_static("sysdigteamid");

/// A cached IAM access token.
///
/// `expiration` is a Unix timestamp in seconds; the token is usable while
/// `now < expiration`. The default value (empty, expiration 0) is always
/// expired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IamToken {
    /// The bearer string.
    pub access_token: String,
    /// Expiry as Unix seconds.
    pub expiration: i64,
}

impl IamToken {
    /// Returns `true` while the token can still be used at time `now`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        !self.access_token.is_empty() && now < self.expiration
    }
}

/// Requester that authenticates with an IBM Cloud IAM token.
pub struct IbmRequester {
    config: ClientConfig,
    ibm: IbmConfig,
    transport: ClientWithMiddleware,
    token: Mutex<IamToken>,
}

impl IbmRequester {
    /// Creates a requester with an empty token cache.
    pub fn new(config: ClientConfig, ibm: IbmConfig) -> Result<Self> {
        if ibm.api_key.trim().is_empty() {
            return Err(Error::Config("IBM API key must not be empty".to_string()));
        }
        if ibm.instance_id.trim().is_empty() {
            return Err(Error::Config("IBM instance ID must not be empty".to_string()));
        }

        let transport = build_transport(&config)?;
        Ok(Self {
            config,
            ibm,
            transport,
            token: Mutex::new(IamToken::default()),
        })
    }

    /// Returns a valid access token, refreshing it if needed.
    ///
    /// On failure the cached token is left untouched.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if cached.is_valid_at(chrono::Utc::now().timestamp()) {
            return Ok(cached.access_token.clone());
        }

        let fresh = self.fetch_token().await?;
        tracing::debug!("Refreshed IBM IAM token, expires at {}", fresh.expiration);
        *cached = fresh;
        Ok(cached.access_token.clone())
    }

    async fn fetch_token(&self) -> Result<IamToken> {
        let url = format!("{}{}", self.ibm.iam_url, IAM_TOKEN_PATH);
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", GRANT_TYPE)
            .append_pair("apikey", &self.ibm.api_key)
            .finish();

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let response = dispatch(
            &self.transport,
            Method::POST,
            &url,
            Some(form.into_bytes()),
            headers,
        )
        .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if status != StatusCode::OK {
            return Err(Error::TokenRefresh(error_message(status, &body)));
        }

        let token: IamToken =
            unmarshal(&body).map_err(|e| Error::TokenRefresh(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(Error::TokenRefresh(
                "identity service returned an empty access token".to_string(),
            ));
        }
        Ok(token)
    }

    fn headers(&self, token: &str, per_call: HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer(token)?);
        headers.insert(
            INSTANCE_ID_HEADER,
            HeaderValue::from_str(&self.ibm.instance_id)
                .map_err(|_| Error::InvalidHeader(INSTANCE_ID_HEADER.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(team_id) = self.ibm.team_id {
            headers.insert(TEAM_ID_HEADER, HeaderValue::from(team_id));
        }
        merge_headers(&mut headers, &self.config, per_call);
        Ok(headers)
    }
}

#[async_trait]
impl Requester for IbmRequester {
    async fn request_with(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<Response> {
        let token = self.access_token().await?;
        let headers = self.headers(&token, headers)?;
        dispatch(&self.transport, method, url, body, headers).await
    }
}
