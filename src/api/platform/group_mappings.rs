//
//  sysdig-client
//  api/platform/group_mappings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSO group mapping types and operations.
//!
//! A group mapping grants a role on a set of teams to every member of an
//! identity-provider group. Reads of a missing mapping come back as
//! [`Error::GroupMappingNotFound`] rather than a generic API error.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::api::common::{OK, OK_OR_CREATED, OK_OR_NOT_FOUND, OK_OR_NO_CONTENT};
use crate::api::marshal::decode;
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

/// Maps an IdP group onto a role within teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub group_name: String,

    /// Team role, e.g. `ROLE_TEAM_READ`.
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_role: Option<String>,

    pub team_map: TeamMap,

    /// Precedence when a user matches several mappings; lower wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

/// Which teams a mapping applies to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMap {
    #[serde(default)]
    pub all_teams: bool,

    #[serde(default)]
    pub team_ids: Vec<i64>,
}

impl TeamMap {
    /// Applies to every team.
    pub fn all() -> Self {
        Self {
            all_teams: true,
            team_ids: Vec::new(),
        }
    }

    /// Applies to the listed teams only.
    pub fn teams(team_ids: impl Into<Vec<i64>>) -> Self {
        Self {
            all_teams: false,
            team_ids: team_ids.into(),
        }
    }
}

/// Group mapping management.
#[async_trait]
pub trait GroupMappingsApi {
    async fn create_group_mapping(&self, mapping: &GroupMapping) -> Result<GroupMapping>;

    /// Returns [`Error::GroupMappingNotFound`] on `404`.
    async fn get_group_mapping(&self, id: i64) -> Result<GroupMapping>;

    async fn update_group_mapping(&self, mapping: &GroupMapping) -> Result<GroupMapping>;

    async fn delete_group_mapping(&self, id: i64) -> Result<()>;

    async fn list_group_mappings(&self) -> Result<Vec<GroupMapping>>;
}

fn mapping_path(id: i64) -> String {
    format!("/api/groupmappings/{id}")
}

#[async_trait]
impl GroupMappingsApi for Client {
    async fn create_group_mapping(&self, mapping: &GroupMapping) -> Result<GroupMapping> {
        self.fetch(ApiRequest::post("/api/groupmappings", mapping)?.expect(OK_OR_CREATED))
            .await
    }

    async fn get_group_mapping(&self, id: i64) -> Result<GroupMapping> {
        let response = self
            .send(ApiRequest::get(mapping_path(id)).expect(OK_OR_NOT_FOUND))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::GroupMappingNotFound(id));
        }
        decode(response).await
    }

    async fn update_group_mapping(&self, mapping: &GroupMapping) -> Result<GroupMapping> {
        let id = mapping.id.ok_or(Error::MissingId("group mapping"))?;
        self.fetch(ApiRequest::put(mapping_path(id), mapping)?.expect(OK))
            .await
    }

    async fn delete_group_mapping(&self, id: i64) -> Result<()> {
        self.execute(ApiRequest::delete(mapping_path(id)).expect(OK_OR_NO_CONTENT))
            .await?;
        Ok(())
    }

    async fn list_group_mappings(&self) -> Result<Vec<GroupMapping>> {
        self.fetch(ApiRequest::get("/api/groupmappings").expect(OK))
            .await
    }
}
