//
//  sysdig-client
//  api/monitor/notification_channels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Notification channel types and operations.
//!
//! A notification channel is where alerts and policy events are delivered:
//! e-mail, Slack, PagerDuty, webhooks and so on. The channel `type` decides
//! which option fields are meaningful; the common ones are typed here and
//! the rest are kept verbatim in [`NotificationChannelOptions::extra`].
//!
//! # Example
//!
//! ```rust
//! use sysdig_client::api::monitor::{NotificationChannel, NotificationChannelOptions};
//!
//! let channel = NotificationChannel {
//!     name: "on-call".to_string(),
//!     kind: "EMAIL".to_string(),
//!     enabled: true,
//!     options: NotificationChannelOptions {
//!         email_recipients: vec!["oncall@example.com".to_string()],
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert_eq!(channel.kind, "EMAIL");
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::{envelope, DELETED_OR_GONE, OK, OK_OR_CREATED, OK_OR_NOT_FOUND};
use crate::api::marshal::decode;
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

const CHANNELS_PATH: &str = "/api/notificationChannels";

/// A notification channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    pub name: String,

    /// `EMAIL`, `SLACK`, `PAGER_DUTY`, `WEBHOOK`, ...
    #[serde(rename = "type")]
    pub kind: String,

    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_test_notification: Option<bool>,

    /// Owning team; absent for shared channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,

    #[serde(default)]
    pub options: NotificationChannelOptions,
}

/// Channel options. Unknown keys survive a read-modify-write cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannelOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_ok: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_resolve: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_recipients: Vec<String>,

    /// Webhook or Slack URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Slack channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_headers: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

envelope!(
    /// `{"notificationChannel": NotificationChannel}`
    NotificationChannelEnvelope, "notificationChannel", NotificationChannel
);

envelope!(
    /// `{"notificationChannels": [NotificationChannel]}`
    NotificationChannelsEnvelope, "notificationChannels", Vec<NotificationChannel>
);

/// Notification channel management.
#[async_trait]
pub trait NotificationChannelsApi {
    async fn create_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<NotificationChannel>;

    /// Returns [`Error::NotificationChannelNotFound`] on `404`.
    async fn get_notification_channel(&self, id: i64) -> Result<NotificationChannel>;

    /// Finds a channel by exact name.
    async fn get_notification_channel_by_name(&self, name: &str) -> Result<NotificationChannel>;

    async fn update_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<NotificationChannel>;

    /// Deletes a channel. A channel that is already gone is not an error.
    async fn delete_notification_channel(&self, id: i64) -> Result<()>;

    async fn list_notification_channels(&self) -> Result<Vec<NotificationChannel>>;
}

fn channel_path(id: i64) -> String {
    format!("{CHANNELS_PATH}/{id}")
}

#[async_trait]
impl NotificationChannelsApi for Client {
    async fn create_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<NotificationChannel> {
        let body = NotificationChannelEnvelope::from(channel.clone());
        let created: NotificationChannelEnvelope = self
            .fetch(ApiRequest::post(CHANNELS_PATH, &body)?.expect(OK_OR_CREATED))
            .await?;
        Ok(created.into_inner())
    }

    async fn get_notification_channel(&self, id: i64) -> Result<NotificationChannel> {
        let response = self
            .send(ApiRequest::get(channel_path(id)).expect(OK_OR_NOT_FOUND))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotificationChannelNotFound(id.to_string()));
        }
        let channel: NotificationChannelEnvelope = decode(response).await?;
        Ok(channel.into_inner())
    }

    async fn get_notification_channel_by_name(&self, name: &str) -> Result<NotificationChannel> {
        self.list_notification_channels()
            .await?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::NotificationChannelNotFound(name.to_string()))
    }

    async fn update_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<NotificationChannel> {
        let id = channel.id.ok_or(Error::MissingId("notification channel"))?;
        let body = NotificationChannelEnvelope::from(channel.clone());
        let updated: NotificationChannelEnvelope = self
            .fetch(ApiRequest::put(channel_path(id), &body)?.expect(OK))
            .await?;
        Ok(updated.into_inner())
    }

    async fn delete_notification_channel(&self, id: i64) -> Result<()> {
        let status = self
            .execute(ApiRequest::delete(channel_path(id)).expect(DELETED_OR_GONE))
            .await?;
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Notification channel {} already deleted", id);
        }
        Ok(())
    }

    async fn list_notification_channels(&self) -> Result<Vec<NotificationChannel>> {
        let channels: NotificationChannelsEnvelope =
            self.fetch(ApiRequest::get(CHANNELS_PATH).expect(OK)).await?;
        Ok(channels.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_options_are_preserved() {
        let json = r#"{
            "notificationChannel": {
                "id": 4,
                "name": "pd",
                "type": "PAGER_DUTY",
                "enabled": true,
                "options": {"account": "acme", "serviceKey": "k", "notifyOnOk": true}
            }
        }"#;

        let channel = serde_json::from_str::<NotificationChannelEnvelope>(json)
            .unwrap()
            .into_inner();
        assert_eq!(channel.options.notify_on_ok, Some(true));
        assert_eq!(channel.options.extra["account"], "acme");

        let back = serde_json::to_value(&channel).unwrap();
        assert_eq!(back["options"]["serviceKey"], "k");
        assert_eq!(back["type"], "PAGER_DUTY");
    }
}
