//! Rule records: the read shape ([`Rule`]) and the create/update shape ([`NewRule`]).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::envelope::RuleEnvelope;
use super::{RequestMode, RuleTarget, Source, TargetKind, VariantKind};
use crate::codec::{self, sibling, to_object};
use crate::error::{CodecError, Result};
use crate::serde_utils::is_empty_str;

/// An integration rule as returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    /// Owning application.
    pub app_id: String,
    /// Version of the event payloads delivered by this rule.
    pub version: String,
    /// `enabled` or `disabled`.
    pub status: String,
    /// Unix milliseconds.
    pub created: Option<i64>,
    /// Unix milliseconds.
    pub modified: Option<i64>,
    pub request_mode: Option<RequestMode>,
    pub source: Source,
    pub target: RuleTarget,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RuleHeader<'a> {
    #[serde(skip_serializing_if = "is_empty_str")]
    id: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    app_id: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    version: &'a str,
    #[serde(skip_serializing_if = "is_empty_str")]
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_mode: Option<RequestMode>,
    source: &'a Source,
}

impl Rule {
    /// The target's discriminator, as sent in `ruleType`.
    pub fn rule_type(&self) -> &'static str {
        self.target.kind().as_str()
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(DateTime::from_timestamp_millis)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified.and_then(DateTime::from_timestamp_millis)
    }

    /// Decode a rule from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let envelope: RuleEnvelope = codec::from_value(value, "rule")?;
        Rule::try_from(envelope)
    }

    /// Encode the rule: fixed fields, then `ruleType` and `target` side by side.
    pub fn to_value(&self) -> Result<Value> {
        let mut record = to_object(&RuleHeader {
            id: &self.id,
            app_id: &self.app_id,
            version: &self.version,
            status: &self.status,
            created: self.created,
            modified: self.modified,
            request_mode: self.request_mode,
            source: &self.source,
        })?;
        sibling::encode(&self.target, &mut record)?;
        Ok(Value::Object(record))
    }
}

impl TryFrom<RuleEnvelope> for Rule {
    type Error = CodecError;

    fn try_from(envelope: RuleEnvelope) -> Result<Self> {
        let target = sibling::decode(&envelope.rule_type, envelope.target)?;
        Ok(Rule {
            id: envelope.id,
            app_id: envelope.app_id,
            version: envelope.version,
            status: envelope.status,
            created: envelope.created,
            modified: envelope.modified,
            request_mode: envelope.request_mode,
            source: envelope.source,
            target,
        })
    }
}

/// Body of a create or update request. Server-assigned fields are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRule {
    pub status: String,
    pub request_mode: Option<RequestMode>,
    pub source: Source,
    pub target: RuleTarget,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRuleHeader<'a> {
    #[serde(skip_serializing_if = "is_empty_str")]
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_mode: Option<RequestMode>,
    source: &'a Source,
}

impl NewRule {
    /// An enabled, single-request rule.
    pub fn new(source: Source, target: impl Into<RuleTarget>) -> Self {
        Self {
            status: "enabled".to_string(),
            request_mode: Some(RequestMode::Single),
            source,
            target: target.into(),
        }
    }

    pub fn rule_type(&self) -> &'static str {
        self.target.kind().as_str()
    }

    pub fn to_value(&self) -> Result<Value> {
        let mut record = to_object(&NewRuleHeader {
            status: &self.status,
            request_mode: self.request_mode,
            source: &self.source,
        })?;
        sibling::encode(&self.target, &mut record)?;
        Ok(Value::Object(record))
    }
}

impl From<&Rule> for NewRule {
    fn from(rule: &Rule) -> Self {
        Self {
            status: rule.status.clone(),
            request_mode: rule.request_mode,
            source: rule.source.clone(),
            target: rule.target.clone(),
        }
    }
}
