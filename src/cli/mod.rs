//
//  sysdig-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod channel;
mod policy;
mod team;
mod user;

pub use channel::ChannelCommand;
pub use policy::PolicyCommand;
pub use team::TeamCommand;
pub use user::UserCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::Client;
use crate::config::Settings;
use crate::output::{OutputFormat, OutputWriter};

/// Sysdig CLI - Work with Sysdig Monitor and Secure from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sysdig",
    version,
    about = "Work with Sysdig Monitor and Secure from the command line",
    long_about = "sysdig is a CLI for the Sysdig Monitor and Secure APIs.\n\n\
                  It brings teams, users, notification channels and runtime policies to your terminal.",
    propagate_version = true,
    after_help = "Use 'sysdig <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Sysdig API base URL
    #[arg(long, global = true, env = "SDC_URL")]
    pub url: Option<String>,

    /// Sysdig API token
    #[arg(long, global = true, env = "SDC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads settings from the config file and the environment, then applies
    /// command-line flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Settings::config_path()?,
        };

        let mut settings = Settings::load_from(&path)?;
        settings.apply_env(|key| std::env::var(key).ok());

        if let Some(url) = &self.url {
            settings.url = Some(url.clone());
        }
        if let Some(token) = &self.token {
            settings.token = Some(token.clone());
        }
        if self.insecure {
            settings.insecure = true;
        }
        Ok(settings)
    }

    /// Builds an API client from [`GlobalOptions::settings`].
    pub fn client(&self) -> Result<Client> {
        self.settings()?.into_client()
    }

    /// Output writer honouring `--json`.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect teams
    Team(TeamCommand),

    /// Inspect users
    User(UserCommand),

    /// Inspect and export notification channels
    #[command(visible_alias = "channels")]
    Channel(ChannelCommand),

    /// Inspect runtime policies
    Policy(PolicyCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = \"https://eu1.app.sysdig.com\"\ntoken = \"from-file\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "sysdig",
            "--config",
            path.to_str().unwrap(),
            "--token",
            "from-flag",
            "--insecure",
            "team",
            "list",
        ])
        .unwrap();

        let settings = cli.global.settings().unwrap();
        assert_eq!(settings.token.as_deref(), Some("from-flag"));
        assert!(settings.insecure);
    }
}
