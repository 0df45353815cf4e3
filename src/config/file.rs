//
//  sysdig-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File Module
//!
//! Loads connection settings from a TOML file and layers `SDC_*` environment
//! variables on top.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/sysdig-client/config.toml`
//! - **macOS**: `~/Library/Application Support/com.sysdig.sysdig-client/config.toml`
//! - **Windows**: `%APPDATA%\sysdig\sysdig-client\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! url = "https://secure.sysdig.com"
//! token = "00000000-0000-0000-0000-000000000000"
//! insecure = false
//! max_retries = 4
//!
//! [extra_headers]
//! X-Sysdig-Team = "platform"
//!
//! [ibm]
//! api_key = "..."
//! instance_id = "..."
//! iam_url = "https://iam.cloud.ibm.com"
//! team_id = 12
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `SDC_URL` | `url` |
//! | `SDC_TOKEN` | `token` |
//! | `SDC_INSECURE` | `insecure` (`true`/`1`) |
//! | `SDC_IBM_API_KEY` | `ibm.api_key` |
//! | `SDC_IBM_INSTANCE_ID` | `ibm.instance_id` |
//! | `SDC_IBM_IAM_URL` | `ibm.iam_url` |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::{ClientConfig, IbmConfig, DEFAULT_IBM_IAM_URL, DEFAULT_MAX_RETRIES};
use crate::api::Client;

/// Default API URL when neither the file nor the environment sets one.
pub const DEFAULT_URL: &str = "https://secure.sysdig.com";

/// Connection settings as stored on disk.
///
/// `Settings` is a plain data holder; it is turned into a validated
/// [`ClientConfig`] (and optionally an [`IbmConfig`]) right before a client
/// is built. Nothing here is global: the CLI loads it once and passes the
/// resulting client down.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// API base URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Static bearer token.
    #[serde(default)]
    pub token: Option<String>,

    /// Disable TLS verification.
    #[serde(default)]
    pub insecure: bool,

    /// Transport retry budget.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Headers added to every request.
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,

    /// IBM Cloud IAM credentials.
    #[serde(default)]
    pub ibm: Option<IbmSettings>,
}

/// The `[ibm]` table of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IbmSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub iam_url: Option<String>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

impl Settings {
    /// Loads settings from the default location, then applies the process
    /// environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut settings = Self::load_from(&path)?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Loads settings from a specific file without touching the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Writes the settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the platform-specific config file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "sysdig", "sysdig-client")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlays `SDC_*` variables resolved through `lookup`.
    ///
    /// Taking the lookup as a parameter keeps this testable without mutating
    /// the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SDC_URL") {
            self.url = Some(url);
        }
        if let Some(token) = lookup("SDC_TOKEN") {
            self.token = Some(token);
        }
        if let Some(insecure) = lookup("SDC_INSECURE") {
            self.insecure = matches!(insecure.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        let api_key = lookup("SDC_IBM_API_KEY");
        let instance_id = lookup("SDC_IBM_INSTANCE_ID");
        let iam_url = lookup("SDC_IBM_IAM_URL");
        if api_key.is_some() || instance_id.is_some() || iam_url.is_some() {
            let ibm = self.ibm.get_or_insert_with(IbmSettings::default);
            if api_key.is_some() {
                ibm.api_key = api_key;
            }
            if instance_id.is_some() {
                ibm.instance_id = instance_id;
            }
            if iam_url.is_some() {
                ibm.iam_url = iam_url;
            }
        }
    }

    /// Builds the validated client configuration.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut builder = ClientConfig::builder(self.url.as_deref().unwrap_or(DEFAULT_URL))
            .insecure(self.insecure)
            .max_retries(self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES));

        if let Some(token) = &self.token {
            builder = builder.token(token.clone());
        }
        for (name, value) in &self.extra_headers {
            builder = builder.extra_header(name.clone(), value.clone());
        }

        Ok(builder.build()?)
    }

    /// Returns IBM credentials when an API key is configured.
    ///
    /// # Errors
    ///
    /// Fails when an API key is present but the instance ID is missing.
    pub fn ibm_config(&self) -> Result<Option<IbmConfig>> {
        let Some(ibm) = &self.ibm else {
            return Ok(None);
        };
        let Some(api_key) = &ibm.api_key else {
            return Ok(None);
        };
        let instance_id = ibm
            .instance_id
            .clone()
            .context("IBM authentication requires an instance_id")?;

        let mut config = IbmConfig::new(api_key.clone(), instance_id)
            .with_iam_url(ibm.iam_url.as_deref().unwrap_or(DEFAULT_IBM_IAM_URL));
        if let Some(team_id) = ibm.team_id {
            config = config.with_team_id(team_id);
        }
        Ok(Some(config))
    }

    /// Builds a client, preferring IBM IAM authentication when configured.
    pub fn into_client(self) -> Result<Client> {
        let config = self.client_config()?;
        match self.ibm_config()? {
            Some(ibm) => Ok(Client::with_ibm(config, ibm)?),
            None => Client::with_token(config).context(
                "No API token configured. Set SDC_TOKEN or add `token` to the config file",
            ),
        }
    }
}
