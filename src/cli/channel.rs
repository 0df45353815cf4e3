//
//  sysdig-client
//  cli/channel.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Notification channel commands
//!
//! `dump` exports every channel as pretty JSON, either to stdout or to a
//! file, so channels can be reviewed or recreated elsewhere.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::monitor::NotificationChannel;
use crate::api::NotificationChannelsApi;
use crate::output::{format_bool, write_json, write_json_to, TableRow};

use super::GlobalOptions;

/// Inspect and export notification channels
#[derive(Args, Debug)]
pub struct ChannelCommand {
    #[command(subcommand)]
    pub command: ChannelSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChannelSubcommand {
    /// List notification channels
    #[command(visible_alias = "ls")]
    List,

    /// Write every notification channel as JSON
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Write to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl TableRow for NotificationChannel {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "TYPE", "ENABLED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            self.name.clone(),
            self.kind.clone(),
            format_bool(self.enabled, color),
        ]
    }
}

impl ChannelCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ChannelSubcommand::List => self.list(global).await,
            ChannelSubcommand::Dump(args) => self.dump(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let channels = client.list_notification_channels().await?;
        global
            .writer()
            .write_list(&channels, "No notification channels found.")
    }

    /// Dump all channels, always as JSON
    async fn dump(&self, args: &DumpArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let channels = client.list_notification_channels().await?;

        match &args.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                write_json_to(&mut writer, &channels)?;
                writer.flush()?;
                global.writer().write_success(&format!(
                    "Dumped {} notification channel(s) to {}",
                    channels.len(),
                    path.display()
                ));
            }
            None => write_json(&channels)?,
        }
        Ok(())
    }
}
