//
//  sysdig-client
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::platform::{User, UserLight};
use crate::api::UsersApi;
use crate::output::{print_field, print_header, TableOutput, TableRow};

use super::GlobalOptions;

/// Inspect users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// List users
    #[command(visible_alias = "ls")]
    List,

    /// View a user by e-mail
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// E-mail address (case-insensitive)
    pub email: String,
}

impl TableRow for UserLight {
    fn headers() -> &'static [&'static str] {
        &["ID", "E-MAIL"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.id.to_string(), self.username.clone()]
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct UserDetail(User);

impl TableOutput for UserDetail {
    fn print_table(&self, color: bool) {
        let user = &self.0;
        print_header(&user.email);
        if let Some(id) = user.id {
            print_field("ID", &id.to_string(), color);
        }
        let name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            print_field("Name", &name, color);
        }
        if let Some(role) = &user.system_role {
            print_field("System role", role, color);
        }
    }
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::List => self.list(global).await,
            UserSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let mut users = client.list_users_light().await?;
        users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));

        global.writer().write_list(&users, "No users found.")
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let user = client.get_user_by_email(&args.email).await?;
        global.writer().write(&UserDetail(user))
    }
}
