//
//  sysdig-client
//  cli/policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Runtime policy commands
//!
//! `view` shows a policy together with the rules it references, fetched
//! through the composite policy lookup.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::secure::{PolicyRulesComposite, Rule};
use crate::api::PoliciesApi;
use crate::output::{format_bool, format_severity, print_field, print_header, TableOutput};

use super::GlobalOptions;

/// Inspect runtime policies
#[derive(Args, Debug)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PolicySubcommand {
    /// View a policy and its rules
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Policy ID
    pub id: i64,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct PolicyDetail(PolicyRulesComposite);

impl TableOutput for PolicyDetail {
    fn print_table(&self, color: bool) {
        let policy = &self.0.policy;
        print_header(&policy.name);
        if let Some(id) = policy.id {
            print_field("ID", &id.to_string(), color);
        }
        print_field("Type", policy.kind(), color);
        print_field("Severity", &format_severity(policy.severity, color), color);
        print_field("Enabled", &format_bool(policy.enabled, color), color);
        if !policy.description.is_empty() {
            print_field("Description", &policy.description, color);
        }
        if let Some(scope) = policy.scope.as_deref().filter(|s| !s.is_empty()) {
            print_field("Scope", scope, color);
        }
        if !policy.actions.is_empty() {
            let actions: Vec<&str> = policy.actions.iter().map(|a| a.kind.as_str()).collect();
            print_field("Actions", &actions.join(", "), color);
        }

        println!();
        if self.0.rules.is_empty() {
            println!("No rules.");
            return;
        }
        println!("Rules ({}):", self.0.rules.len());
        for rule in &self.0.rules {
            println!("  {}", rule_line(rule, color));
        }
    }
}

fn rule_line(rule: &Rule, color: bool) -> String {
    let name = if color {
        style(&rule.name).bold().to_string()
    } else {
        rule.name.clone()
    };
    let id = rule
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "-".to_string());
    format!("{} [{}] {}", name, rule.details.rule_type, id)
}

impl PolicyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PolicySubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let composite = client.get_composite_policy(args.id).await?;
        global.writer().write(&PolicyDetail(composite))
    }
}
