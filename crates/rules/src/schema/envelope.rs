//! First-pass record shapes for two-pass decoding.
//!
//! The fixed fields are decoded and the discriminator is read as a plain
//! string, while `target` stays an uninterpreted [`Value`] until the registry
//! has resolved `ruleType`.

use serde::Deserialize;
use serde_json::Value;

use super::{RequestMode, Source};

/// Lightweight first pass over a rule record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RuleEnvelope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub modified: Option<i64>,
    #[serde(default)]
    pub request_mode: Option<RequestMode>,
    #[serde(default)]
    pub source: Source,
    pub rule_type: String,
    pub target: Value,
}

/// Lightweight first pass over an ingress rule record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IngressRuleEnvelope {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub modified: Option<i64>,
    pub rule_type: String,
    pub target: Value,
}
