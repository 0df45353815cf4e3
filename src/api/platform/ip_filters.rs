//
//  sysdig-client
//  api/platform/ip_filters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! IP filter types and operations.
//!
//! IP filters restrict which source addresses may reach the Sysdig UI and
//! API. They live under `/platform/v1` and every call carries the
//! `Sysdig-Provider` marker header. A separate settings object switches
//! filtering on or off globally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::common::{Page, CREATED, NO_CONTENT, OK, PAGE_SIZE};
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

const IP_FILTERS_PATH: &str = "/platform/v1/ip-filters";
const IP_FILTERS_SETTINGS_PATH: &str = "/platform/v1/ip-filters-settings";

/// An allowed source range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// CIDR notation, e.g. `192.168.0.0/24`.
    pub ip_range: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub is_enabled: bool,

    /// Set by the API; echoed back unchanged on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Global switch for IP filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpFiltersSettings {
    pub is_filtering_enabled: bool,
}

/// IP filter management.
#[async_trait]
pub trait IpFiltersApi {
    async fn create_ip_filter(&self, filter: &IpFilter) -> Result<IpFilter>;

    async fn get_ip_filter(&self, id: i64) -> Result<IpFilter>;

    async fn update_ip_filter(&self, filter: &IpFilter) -> Result<IpFilter>;

    async fn delete_ip_filter(&self, id: i64) -> Result<()>;

    /// Lists up to [`PAGE_SIZE`] filters.
    async fn list_ip_filters(&self) -> Result<Page<IpFilter>>;

    async fn get_ip_filters_settings(&self) -> Result<IpFiltersSettings>;

    async fn update_ip_filters_settings(
        &self,
        settings: &IpFiltersSettings,
    ) -> Result<IpFiltersSettings>;
}

fn filter_path(id: i64) -> String {
    format!("{IP_FILTERS_PATH}/{id}")
}

#[async_trait]
impl IpFiltersApi for Client {
    async fn create_ip_filter(&self, filter: &IpFilter) -> Result<IpFilter> {
        self.fetch(
            ApiRequest::post(IP_FILTERS_PATH, filter)?
                .expect(CREATED)
                .with_provider_marker(),
        )
        .await
    }

    async fn get_ip_filter(&self, id: i64) -> Result<IpFilter> {
        self.fetch(
            ApiRequest::get(filter_path(id))
                .expect(OK)
                .with_provider_marker(),
        )
        .await
    }

    async fn update_ip_filter(&self, filter: &IpFilter) -> Result<IpFilter> {
        let id = filter.id.ok_or(Error::MissingId("IP filter"))?;
        self.fetch(
            ApiRequest::put(filter_path(id), filter)?
                .expect(OK)
                .with_provider_marker(),
        )
        .await
    }

    async fn delete_ip_filter(&self, id: i64) -> Result<()> {
        self.execute(
            ApiRequest::delete(filter_path(id))
                .expect(NO_CONTENT)
                .with_provider_marker(),
        )
        .await?;
        Ok(())
    }

    async fn list_ip_filters(&self) -> Result<Page<IpFilter>> {
        self.fetch(
            ApiRequest::get(format!("{IP_FILTERS_PATH}?limit={PAGE_SIZE}"))
                .expect(OK)
                .with_provider_marker(),
        )
        .await
    }

    async fn get_ip_filters_settings(&self) -> Result<IpFiltersSettings> {
        self.fetch(
            ApiRequest::get(IP_FILTERS_SETTINGS_PATH)
                .expect(OK)
                .with_provider_marker(),
        )
        .await
    }

    async fn update_ip_filters_settings(
        &self,
        settings: &IpFiltersSettings,
    ) -> Result<IpFiltersSettings> {
        self.fetch(
            ApiRequest::put(IP_FILTERS_SETTINGS_PATH, settings)?
                .expect(OK)
                .with_provider_marker(),
        )
        .await
    }
}
