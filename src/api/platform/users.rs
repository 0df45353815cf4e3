//
//  sysdig-client
//  api/platform/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User API types and operations.
//!
//! Users are identified by numeric ID in the API but by e-mail (the
//! `username` field) everywhere a human is involved. The lightweight
//! `/api/users/light` listing is what the client uses to bridge the two.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::common::{envelope, CREATED, OK, OK_OR_NO_CONTENT};
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

/// A Sysdig user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    /// The user's e-mail address.
    #[serde(rename = "username")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// `ROLE_USER` or `ROLE_CUSTOMER` (admin).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_role: Option<String>,
}

/// Entry of the `/api/users/light` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLight {
    pub id: i64,
    pub username: String,
}

envelope!(
    /// `{"user": User}`
    UserEnvelope, "user", User
);

envelope!(
    /// `{"users": [UserLight]}`
    UsersLightEnvelope, "users", Vec<UserLight>
);

/// User management.
#[async_trait]
pub trait UsersApi {
    /// Creates a user. Expects `201 Created`.
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Fetches a user by ID.
    async fn get_user(&self, id: i64) -> Result<User>;

    /// Fetches a user by e-mail, via the light listing.
    ///
    /// Returns [`Error::UserNotFound`] when no user has that e-mail.
    async fn get_user_by_email(&self, email: &str) -> Result<User>;

    /// Replaces a user. The user must carry its ID.
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Deletes a user.
    async fn delete_user(&self, id: i64) -> Result<()>;

    /// Lists all users as `(id, username)` pairs.
    async fn list_users_light(&self) -> Result<Vec<UserLight>>;
}

/// Normalizes an e-mail address for case-insensitive lookups.
pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_path(id: i64) -> String {
    format!("/api/users/{id}")
}

fn require_id(user: &User) -> Result<i64> {
    user.id.ok_or(Error::MissingId("user"))
}

#[async_trait]
impl UsersApi for Client {
    async fn create_user(&self, user: &User) -> Result<User> {
        let body = UserEnvelope::from(user.clone());
        let created: UserEnvelope = self
            .fetch(ApiRequest::post("/api/users", &body)?.expect(CREATED))
            .await?;
        Ok(created.into_inner())
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        let user: UserEnvelope = self.fetch(ApiRequest::get(user_path(id)).expect(OK)).await?;
        Ok(user.into_inner())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let key = email_key(email);
        let id = self
            .list_users_light()
            .await?
            .into_iter()
            .find(|u| email_key(&u.username) == key)
            .map(|u| u.id)
            .ok_or_else(|| Error::UserNotFound(email.to_string()))?;
        self.get_user(id).await
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let id = require_id(user)?;
        let body = UserEnvelope::from(user.clone());
        let updated: UserEnvelope = self
            .fetch(ApiRequest::put(user_path(id), &body)?.expect(OK))
            .await?;
        Ok(updated.into_inner())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.execute(ApiRequest::delete(user_path(id)).expect(OK_OR_NO_CONTENT))
            .await?;
        Ok(())
    }

    async fn list_users_light(&self) -> Result<Vec<UserLight>> {
        let users: UsersLightEnvelope = self
            .fetch(ApiRequest::get("/api/users/light").expect(OK))
            .await?;
        Ok(users.into_inner())
    }
}
