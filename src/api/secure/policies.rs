//
//  sysdig-client
//  api/secure/policies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Runtime policy types and operations.
//!
//! A policy references its rules by name. The composite operations manage a
//! policy together with the rules it owns ([`PolicyRulesComposite`]), issuing
//! the rule and policy calls one after another:
//!
//! | Operation | Sequence |
//! |-----------|----------|
//! | create | create each rule → create policy (rules rolled back on failure) |
//! | get | get policy → get rule group per rule name |
//! | update | update or create each rule → update policy |
//! | delete | delete policy → delete each rule |

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::rules::{Rule, RulesApi};
use crate::api::common::{DELETED_OR_GONE, OK, OK_OR_CREATED};
use crate::api::{ApiRequest, Client};
use crate::error::{Error, Result};

const POLICIES_PATH: &str = "/api/v2/policies";

/// Policy type used when a policy does not declare one.
pub const DEFAULT_POLICY_TYPE: &str = "falco";

/// A runtime policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// 0-3 high, 4-5 medium, 6 low, 7 info.
    #[serde(default)]
    pub severity: i32,

    #[serde(default)]
    pub enabled: bool,

    /// `falco`, `list_matching`, `k8s_audit`, `aws_cloudtrail`, ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default)]
    pub rule_names: Vec<String>,

    #[serde(default)]
    pub actions: Vec<PolicyAction>,

    #[serde(default)]
    pub notification_channel_ids: Vec<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runbook: Option<String>,
}

impl Policy {
    /// The policy type, defaulting to [`DEFAULT_POLICY_TYPE`].
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_POLICY_TYPE)
    }
}

/// Action taken when a policy fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAction {
    /// `POLICY_ACTION_STOP`, `POLICY_ACTION_KILL`, `POLICY_ACTION_CAPTURE`, ...
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_limited_to_container: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_event_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_event_ns: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A policy plus the rules it owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRulesComposite {
    pub policy: Policy,
    pub rules: Vec<Rule>,
}

/// Runtime policy management.
#[async_trait]
pub trait PoliciesApi {
    async fn create_policy(&self, policy: &Policy) -> Result<Policy>;

    async fn get_policy(&self, id: i64) -> Result<Policy>;

    async fn update_policy(&self, policy: &Policy) -> Result<Policy>;

    /// Deletes a policy. A policy that is already gone is not an error.
    async fn delete_policy(&self, id: i64) -> Result<()>;

    /// Creates the rules, then a policy referencing them.
    ///
    /// If the policy cannot be created the rules created by this call are
    /// deleted again before the error is returned.
    async fn create_composite_policy(
        &self,
        composite: &PolicyRulesComposite,
    ) -> Result<PolicyRulesComposite>;

    /// Fetches a policy and the rules it names.
    async fn get_composite_policy(&self, id: i64) -> Result<PolicyRulesComposite>;

    /// Updates existing rules, creates new ones, then updates the policy.
    async fn update_composite_policy(
        &self,
        composite: &PolicyRulesComposite,
    ) -> Result<PolicyRulesComposite>;

    /// Deletes the policy, then its rules.
    async fn delete_composite_policy(&self, composite: &PolicyRulesComposite) -> Result<()>;
}

fn policy_path(id: i64) -> String {
    format!("{POLICIES_PATH}/{id}")
}

fn rule_names(rules: &[Rule]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(rules.len());
    for rule in rules {
        if !names.contains(&rule.name) {
            names.push(rule.name.clone());
        }
    }
    names
}

#[async_trait]
impl PoliciesApi for Client {
    async fn create_policy(&self, policy: &Policy) -> Result<Policy> {
        self.fetch(ApiRequest::post(POLICIES_PATH, policy)?.expect(OK_OR_CREATED))
            .await
    }

    async fn get_policy(&self, id: i64) -> Result<Policy> {
        self.fetch(ApiRequest::get(policy_path(id)).expect(OK)).await
    }

    async fn update_policy(&self, policy: &Policy) -> Result<Policy> {
        let id = policy.id.ok_or(Error::MissingId("policy"))?;
        self.fetch(ApiRequest::put(policy_path(id), policy)?.expect(OK))
            .await
    }

    async fn delete_policy(&self, id: i64) -> Result<()> {
        let status = self
            .execute(ApiRequest::delete(policy_path(id)).expect(DELETED_OR_GONE))
            .await?;
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Policy {} already deleted", id);
        }
        Ok(())
    }

    async fn create_composite_policy(
        &self,
        composite: &PolicyRulesComposite,
    ) -> Result<PolicyRulesComposite> {
        let mut rules = Vec::with_capacity(composite.rules.len());
        for rule in &composite.rules {
            match self.create_rule(rule).await {
                Ok(created) => rules.push(created),
                Err(e) => {
                    rollback_rules(self, &rules).await;
                    return Err(e);
                }
            }
        }

        let mut policy = composite.policy.clone();
        policy.rule_names = rule_names(&rules);

        match self.create_policy(&policy).await {
            Ok(policy) => Ok(PolicyRulesComposite { policy, rules }),
            Err(e) => {
                rollback_rules(self, &rules).await;
                Err(e)
            }
        }
    }

    async fn get_composite_policy(&self, id: i64) -> Result<PolicyRulesComposite> {
        let policy = self.get_policy(id).await?;

        let mut rules = Vec::new();
        for name in &policy.rule_names {
            let group = self.get_rule_group(name, policy.kind()).await?;
            rules.extend(group.into_iter().filter(|r| &r.name == name));
        }

        Ok(PolicyRulesComposite { policy, rules })
    }

    async fn update_composite_policy(
        &self,
        composite: &PolicyRulesComposite,
    ) -> Result<PolicyRulesComposite> {
        let mut rules = Vec::with_capacity(composite.rules.len());
        for rule in &composite.rules {
            let saved = match rule.id {
                Some(_) => self.update_rule(rule).await?,
                None => self.create_rule(rule).await?,
            };
            rules.push(saved);
        }

        let mut policy = composite.policy.clone();
        policy.rule_names = rule_names(&rules);
        let policy = self.update_policy(&policy).await?;

        Ok(PolicyRulesComposite { policy, rules })
    }

    async fn delete_composite_policy(&self, composite: &PolicyRulesComposite) -> Result<()> {
        let id = composite.policy.id.ok_or(Error::MissingId("policy"))?;
        self.delete_policy(id).await?;

        for rule in &composite.rules {
            if let Some(rule_id) = rule.id {
                self.delete_rule(rule_id).await?;
            }
        }
        Ok(())
    }
}

/// Best-effort removal of rules created earlier in a failed composite call.
async fn rollback_rules(client: &Client, rules: &[Rule]) {
    for rule in rules {
        let Some(id) = rule.id else { continue };
        if let Err(e) = client.delete_rule(id).await {
            tracing::warn!("Failed to roll back rule {} ({}): {}", id, rule.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> Rule {
        Rule {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_names_are_unique_and_ordered() {
        let rules = [rule("b"), rule("a"), rule("b")];
        assert_eq!(rule_names(&rules), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_policy_kind_defaults_to_falco() {
        let mut policy = Policy::default();
        assert_eq!(policy.kind(), "falco");
        policy.kind = Some("aws_cloudtrail".to_string());
        assert_eq!(policy.kind(), "aws_cloudtrail");
    }

    #[test]
    fn test_policy_wire_format() {
        let policy = Policy {
            name: "Terminal shell".to_string(),
            severity: 4,
            enabled: true,
            kind: Some("falco".to_string()),
            rule_names: vec!["Terminal shell in container".to_string()],
            actions: vec![PolicyAction {
                kind: "POLICY_ACTION_STOP".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["type"], "falco");
        assert_eq!(json["ruleNames"][0], "Terminal shell in container");
        assert_eq!(json["actions"][0]["type"], "POLICY_ACTION_STOP");
        assert!(json.get("id").is_none());
    }
}
