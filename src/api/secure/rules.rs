//
//  sysdig-client
//  api/secure/rules.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Runtime rule types and operations.
//!
//! Rules are the building blocks of runtime policies. Policies reference
//! rules by name, and several rules may share a name (a rule "group", e.g.
//! a default Falco rule plus an `append` customization). The group lookup
//! is what [`PoliciesApi::get_composite_policy`](super::PoliciesApi::get_composite_policy)
//! uses to stitch a policy and its rules back together.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::{OK, OK_OR_NO_CONTENT};
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

const RULES_PATH: &str = "/api/secure/rules";

/// A runtime rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub details: RuleDetails,
}

/// Type-specific rule body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDetails {
    /// `FALCO`, `PROCESS`, `CONTAINER`, `NETWORK`, ...
    pub rule_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<RuleCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    /// Fields of non-Falco rule types (process lists, ports, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A Falco condition expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub condition: String,

    #[serde(default)]
    pub components: Vec<Value>,
}

/// Rule management.
#[async_trait]
pub trait RulesApi {
    async fn create_rule(&self, rule: &Rule) -> Result<Rule>;

    async fn get_rule(&self, id: i64) -> Result<Rule>;

    async fn update_rule(&self, rule: &Rule) -> Result<Rule>;

    async fn delete_rule(&self, id: i64) -> Result<()>;

    /// Returns every rule with the given name and rule type.
    async fn get_rule_group(&self, name: &str, rule_type: &str) -> Result<Vec<Rule>>;
}

fn rule_path(id: i64) -> String {
    format!("{RULES_PATH}/{id}")
}

fn group_path(name: &str, rule_type: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .append_pair("type", rule_type)
        .finish();
    format!("{RULES_PATH}/groups?{query}")
}

#[async_trait]
impl RulesApi for Client {
    async fn create_rule(&self, rule: &Rule) -> Result<Rule> {
        self.fetch(ApiRequest::post(RULES_PATH, rule)?.expect(OK))
            .await
    }

    async fn get_rule(&self, id: i64) -> Result<Rule> {
        self.fetch(ApiRequest::get(rule_path(id)).expect(OK)).await
    }

    async fn update_rule(&self, rule: &Rule) -> Result<Rule> {
        let id = rule.id.ok_or(Error::MissingId("rule"))?;
        self.fetch(ApiRequest::put(rule_path(id), rule)?.expect(OK))
            .await
    }

    async fn delete_rule(&self, id: i64) -> Result<()> {
        self.execute(ApiRequest::delete(rule_path(id)).expect(OK_OR_NO_CONTENT))
            .await?;
        Ok(())
    }

    async fn get_rule_group(&self, name: &str, rule_type: &str) -> Result<Vec<Rule>> {
        self.fetch(ApiRequest::get(group_path(name, rule_type)).expect(OK))
            .await
    }
}
