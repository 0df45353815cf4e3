//
//  sysdig-client
//  api/platform/teams.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Team API types and operations.
//!
//! Teams scope what their members can see and do. Membership is sent to the
//! API as numeric user IDs with a role, but callers describe it by e-mail
//! ([`TeamMember`]). Create and update resolve e-mails to IDs with a single
//! `/api/users/light` lookup before the team call itself.
//!
//! # Example
//!
//! ```rust,no_run
//! use sysdig_client::api::{Client, TeamsApi};
//! use sysdig_client::api::platform::{Team, TeamMember};
//!
//! # async fn example(client: Client) -> sysdig_client::Result<()> {
//! let team = Team {
//!     name: "platform".to_string(),
//!     products: vec!["SDS".to_string()],
//!     ..Default::default()
//! };
//! let members = [TeamMember::new("jane@example.com", "ROLE_TEAM_EDIT")];
//!
//! let created = client.create_team(&team, &members).await?;
//! println!("created team {:?}", created.id);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::users::{email_key, UsersApi};
use crate::api::common::{envelope, OK, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

/// A Sysdig team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Hex color shown in the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// `host` or `container`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_by: Option<String>,

    /// Scope expression limiting visible data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_use_sysdig_capture: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_use_custom_events: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_use_aws_metrics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_use_beacon_metrics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_team_role: Option<String>,

    /// `SDC` (Monitor) and/or `SDS` (Secure).
    #[serde(default)]
    pub products: Vec<String>,

    #[serde(default)]
    pub user_roles: Vec<UserRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<EntryPoint>,
}

/// A member's role inside a team, as the API stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub user_id: i64,

    /// Filled in by the API on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    pub role: String,
}

/// Landing page for team members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub module: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
}

/// A team member described by e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub email: String,
    pub role: String,
}

impl TeamMember {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }
}

envelope!(
    /// `{"team": Team}`
    TeamEnvelope, "team", Team
);

envelope!(
    /// `{"teams": [Team]}`
    TeamsEnvelope, "teams", Vec<Team>
);

/// Team management.
#[async_trait]
pub trait TeamsApi {
    /// Creates a team with the given members.
    ///
    /// Fails with [`Error::UserNotFound`] before any team call if a member's
    /// e-mail does not belong to a user.
    async fn create_team(&self, team: &Team, members: &[TeamMember]) -> Result<Team>;

    /// Fetches a team by ID.
    async fn get_team(&self, id: i64) -> Result<Team>;

    /// Replaces a team and its membership. The team must carry its ID.
    async fn update_team(&self, team: &Team, members: &[TeamMember]) -> Result<Team>;

    /// Deletes a team.
    async fn delete_team(&self, id: i64) -> Result<()>;

    /// Lists all teams.
    async fn list_teams(&self) -> Result<Vec<Team>>;
}

/// Maps members onto user IDs using the light user listing.
async fn resolve_members(client: &Client, members: &[TeamMember]) -> Result<Vec<UserRole>> {
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let ids: HashMap<String, i64> = client
        .list_users_light()
        .await?
        .into_iter()
        .map(|u| (email_key(&u.username), u.id))
        .collect();

    members
        .iter()
        .map(|member| {
            ids.get(&email_key(&member.email))
                .map(|&user_id| UserRole {
                    user_id,
                    user_name: None,
                    role: member.role.clone(),
                })
                .ok_or_else(|| Error::UserNotFound(member.email.clone()))
        })
        .collect()
}

fn team_path(id: i64) -> String {
    format!("/api/teams/{id}")
}

#[async_trait]
impl TeamsApi for Client {
    async fn create_team(&self, team: &Team, members: &[TeamMember]) -> Result<Team> {
        let mut team = team.clone();
        team.user_roles = resolve_members(self, members).await?;

        let created: TeamEnvelope = self
            .fetch(ApiRequest::post("/api/teams", &TeamEnvelope::from(team))?.expect(OK_OR_CREATED))
            .await?;
        Ok(created.into_inner())
    }

    async fn get_team(&self, id: i64) -> Result<Team> {
        let team: TeamEnvelope = self.fetch(ApiRequest::get(team_path(id)).expect(OK)).await?;
        Ok(team.into_inner())
    }

    async fn update_team(&self, team: &Team, members: &[TeamMember]) -> Result<Team> {
        let id = team.id.ok_or(Error::MissingId("team"))?;
        let mut team = team.clone();
        team.user_roles = resolve_members(self, members).await?;

        let updated: TeamEnvelope = self
            .fetch(ApiRequest::put(team_path(id), &TeamEnvelope::from(team))?.expect(OK))
            .await?;
        Ok(updated.into_inner())
    }

    async fn delete_team(&self, id: i64) -> Result<()> {
        self.execute(ApiRequest::delete(team_path(id)).expect(OK_OR_NO_CONTENT))
            .await?;
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let teams: TeamsEnvelope = self.fetch(ApiRequest::get("/api/teams").expect(OK)).await?;
        Ok(teams.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_deserializes_api_response() {
        let json = r##"{
            "team": {
                "id": 12,
                "version": 3,
                "name": "platform",
                "theme": "#05C391",
                "products": ["SDS"],
                "userRoles": [{"userId": 7, "userName": "jane@example.com", "role": "ROLE_TEAM_EDIT"}],
                "entryPoint": {"module": "Explore"},
                "origin": "SYSDIG"
            }
        }"##;

        let team: TeamEnvelope = serde_json::from_str(json).unwrap();
        let team = team.into_inner();
        assert_eq!(team.id, Some(12));
        assert_eq!(team.user_roles[0].user_id, 7);
        assert_eq!(team.entry_point.unwrap().module, "Explore");
    }
}
