//
//  sysdig-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Sysdig Client Library
//!
//! A typed client for the Sysdig Monitor and Secure REST APIs, plus the
//! `sysdig` command-line tool built on top of it.
//!
//! ## Overview
//!
//! Every call follows the same shape: build a path, marshal the request
//! body to JSON, send it through an authenticating [`api::Requester`],
//! check the status against the endpoint's allow-list and unmarshal the
//! response. Resource families are capability traits implemented on
//! [`api::Client`].
//!
//! ## Features
//!
//! - **Two authentication modes**: static API token, or IBM Cloud IAM with a
//!   cached, self-refreshing access token
//! - **Retrying transport**: transient failures are retried with exponential
//!   backoff
//! - **Readable errors**: API error envelopes are flattened into one message
//! - **Platform, Monitor and Secure resources**: users, teams, group mappings,
//!   IP filters, notification channels, rules, policies and posture zones
//!
//! ## Module Structure
//!
//! - [`api`]: Requesters, the client and resource modules
//! - [`config`]: Client configuration and the config file
//! - [`error`]: The library error type
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON output for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sysdig_client::api::{Client, NotificationChannelsApi};
//! use sysdig_client::config::ClientConfig;
//!
//! # async fn example() -> sysdig_client::Result<()> {
//! let config = ClientConfig::builder("https://app.sysdigcloud.com")
//!     .token("my-api-token")
//!     .build()?;
//! let client = Client::with_token(config)?;
//!
//! for channel in client.list_notification_channels().await? {
//!     println!("{} ({})", channel.name, channel.kind);
//! }
//! # Ok(())
//! # }
//! ```

/// API client, requesters and resource modules.
pub mod api;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Client configuration and config file management.
///
/// The config file lives in a platform-specific location:
/// - Linux: `~/.config/sysdig-client/config.toml`
/// - macOS: `~/Library/Application Support/com.sysdig.sysdig-client/config.toml`
/// - Windows: `%APPDATA%\sysdig\sysdig-client\config\config.toml`
pub mod config;

pub mod error;

/// Output formatting for the CLI.
pub mod output;

pub use error::{Error, Result};

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Application version, from Cargo.toml.
///
/// Also sent in the `User-Agent` header as `sysdig-client/<VERSION>`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// ```rust,no_run
/// use sysdig_client::exit_codes;
///
/// std::process::exit(exit_codes::ERROR);
/// ```
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// Any failure. Details are printed to stderr.
    pub const ERROR: i32 = 1;
}
