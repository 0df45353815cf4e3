//
//  sysdig-client
//  cli/team.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Team commands
//!
//! Teams scope what their members can see in Monitor and Secure. This
//! module provides commands to list teams and view a team with its members.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::platform::{Team, UserRole};
use crate::api::TeamsApi;
use crate::output::{print_field, print_header, truncate, TableOutput, TableRow};

use super::GlobalOptions;

/// Inspect teams
#[derive(Args, Debug)]
pub struct TeamCommand {
    #[command(subcommand)]
    pub command: TeamSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamSubcommand {
    /// List teams
    #[command(visible_alias = "ls")]
    List,

    /// View team details and members
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Team ID
    pub id: i64,
}

// Display Types

#[derive(Debug, Serialize)]
struct TeamListItem {
    id: Option<i64>,
    name: String,
    products: Vec<String>,
    default_role: Option<String>,
    members: usize,
}

impl From<Team> for TeamListItem {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            products: team.products,
            default_role: team.default_team_role,
            members: team.user_roles.len(),
        }
    }
}

impl TableRow for TeamListItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PRODUCTS", "DEFAULT ROLE", "MEMBERS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let name = if color {
            style(&self.name).bold().to_string()
        } else {
            self.name.clone()
        };
        vec![
            display_id(self.id),
            name,
            self.products.join(", "),
            self.default_role.clone().unwrap_or_else(|| "-".to_string()),
            self.members.to_string(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct TeamDetail {
    #[serde(flatten)]
    team: Team,
}

impl TableOutput for TeamDetail {
    fn print_table(&self, color: bool) {
        let team = &self.team;
        print_header(&team.name);
        print_field("ID", &display_id(team.id), color);
        if let Some(description) = &team.description {
            print_field("Description", &truncate(description, 72), color);
        }
        print_field("Products", &team.products.join(", "), color);
        if let Some(role) = &team.default_team_role {
            print_field("Default role", role, color);
        }
        if let Some(filter) = &team.filter {
            print_field("Scope", filter, color);
        }
        if let Some(entry) = &team.entry_point {
            print_field("Entry point", &entry.module, color);
        }

        println!();
        if team.user_roles.is_empty() {
            println!("No members.");
            return;
        }
        println!("Members ({}):", team.user_roles.len());
        for member in &team.user_roles {
            println!("  {}", member_line(member));
        }
    }
}

fn display_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn member_line(member: &UserRole) -> String {
    match &member.user_name {
        Some(name) => format!("{:<40} {}", name, member.role),
        None => format!("{:<40} {}", format!("user {}", member.user_id), member.role),
    }
}

impl TeamCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            TeamSubcommand::List => self.list(global).await,
            TeamSubcommand::View(args) => self.view(args, global).await,
        }
    }

    /// List all teams
    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let items: Vec<TeamListItem> = client
            .list_teams()
            .await?
            .into_iter()
            .map(TeamListItem::from)
            .collect();

        global.writer().write_list(&items, "No teams found.")
    }

    /// View a single team
    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let team = client.get_team(args.id).await?;
        global.writer().write(&TeamDetail { team })
    }
}
