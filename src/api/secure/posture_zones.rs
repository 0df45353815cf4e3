//
//  sysdig-client
//  api/secure/posture_zones.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Posture zone types and operations.
//!
//! Zones group cloud and Kubernetes targets so posture policies can be
//! evaluated against them. The zones endpoint upserts: a request without an
//! `id` creates a zone, a request with one replaces it. Responses wrap the
//! zone in a `data` key.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::common::{envelope, OK_OR_CREATED, OK_OR_NOT_FOUND, OK_OR_NO_CONTENT};
use crate::api::marshal::decode;
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

const ZONES_PATH: &str = "/api/cspm/v1/policy/zones";

/// A posture zone as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureZone {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub last_modified_by: String,

    #[serde(default)]
    pub last_updated: String,

    #[serde(default)]
    pub policy_ids: Vec<i64>,

    #[serde(default)]
    pub scopes: Vec<PostureZoneScope>,
}

/// Create or update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureZoneRequest {
    /// Empty to create a new zone.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Policy IDs, sent as strings.
    #[serde(default)]
    pub policy_ids: Vec<String>,

    #[serde(default)]
    pub scopes: Vec<PostureZoneScope>,
}

/// One target selection inside a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureZoneScope {
    /// `aws`, `gcp`, `azure`, `kubernetes`, `host`, ...
    pub target_type: String,

    /// Filter expression, e.g. `organization in ("o1")`.
    #[serde(default)]
    pub rules: String,
}

impl From<&PostureZone> for PostureZoneRequest {
    fn from(zone: &PostureZone) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            description: zone.description.clone(),
            policy_ids: zone.policy_ids.iter().map(i64::to_string).collect(),
            scopes: zone.scopes.clone(),
        }
    }
}

envelope!(
    /// `{"data": PostureZone}`
    PostureZoneEnvelope, "data", PostureZone
);

/// Posture zone management.
#[async_trait]
pub trait PostureZonesApi {
    /// Creates the zone, or replaces it when `request.id` is set.
    async fn upsert_posture_zone(&self, request: &PostureZoneRequest) -> Result<PostureZone>;

    /// Returns [`Error::PostureZoneNotFound`] on `404`.
    async fn get_posture_zone(&self, id: &str) -> Result<PostureZone>;

    async fn delete_posture_zone(&self, id: &str) -> Result<()>;
}

fn zone_path(id: &str) -> String {
    format!("{ZONES_PATH}/{id}")
}

#[async_trait]
impl PostureZonesApi for Client {
    async fn upsert_posture_zone(&self, request: &PostureZoneRequest) -> Result<PostureZone> {
        let zone: PostureZoneEnvelope = self
            .fetch(
                ApiRequest::post(ZONES_PATH, request)?
                    .expect(OK_OR_CREATED)
                    .with_provider_marker(),
            )
            .await?;
        Ok(zone.into_inner())
    }

    async fn get_posture_zone(&self, id: &str) -> Result<PostureZone> {
        let response = self
            .send(
                ApiRequest::get(zone_path(id))
                    .expect(OK_OR_NOT_FOUND)
                    .with_provider_marker(),
            )
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::PostureZoneNotFound(id.to_string()));
        }
        let zone: PostureZoneEnvelope = decode(response).await?;
        Ok(zone.into_inner())
    }

    async fn delete_posture_zone(&self, id: &str) -> Result<()> {
        self.execute(
            ApiRequest::delete(zone_path(id))
                .expect(OK_OR_NO_CONTENT)
                .with_provider_marker(),
        )
        .await?;
        Ok(())
    }
}
