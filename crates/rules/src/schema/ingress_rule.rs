//! Ingress rule records: [`IngressRule`] as read, [`NewIngressRule`] as sent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::envelope::IngressRuleEnvelope;
use super::{IngressTarget, IngressTargetKind, VariantKind};
use crate::codec::{self, sibling, to_object};
use crate::error::{CodecError, Result};
use crate::serde_utils::is_empty_str;

/// An ingress rule as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressRule {
    pub id: String,
    pub app_id: String,
    pub version: String,
    pub status: String,
    /// Unix milliseconds.
    pub created: Option<i64>,
    /// Unix milliseconds.
    pub modified: Option<i64>,
    pub target: IngressTarget,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IngressRuleHeader<'a> {
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
}

impl IngressRule {
    /// The target's discriminator, as sent in `ruleType`.
    pub fn rule_type(&self) -> &'static str {
        self.target.kind().as_str()
    }

    pub fn kind(&self) -> IngressTargetKind {
        self.target.kind()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(DateTime::from_timestamp_millis)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified.and_then(DateTime::from_timestamp_millis)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let envelope: IngressRuleEnvelope = codec::from_value(value, "rule")?;
        IngressRule::try_from(envelope)
    }

    pub fn to_value(&self) -> Result<Value> {
        let mut record = to_object(&IngressRuleHeader {
            id: &self.id,
            app_id: &self.app_id,
            version: &self.version,
            status: &self.status,
            created: self.created,
            modified: self.modified,
        })?;
        sibling::encode(&self.target, &mut record)?;
        Ok(Value::Object(record))
    }
}

impl TryFrom<IngressRuleEnvelope> for IngressRule {
    type Error = CodecError;

    fn try_from(envelope: IngressRuleEnvelope) -> Result<Self> {
        let target = sibling::decode(&envelope.rule_type, envelope.target)?;
        Ok(IngressRule {
            id: envelope.id,
            app_id: envelope.app_id,
            version: envelope.version,
            status: envelope.status,
            created: envelope.created,
            modified: envelope.modified,
            target,
        })
    }
}

/// Body of an ingress rule create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngressRule {
    pub status: String,
    pub target: IngressTarget,
}

#[derive(Serialize)]
struct NewIngressRuleHeader<'a> {
    #[serde(skip_serializing_if = "is_empty_str")]
    status: &'a str,
}

impl NewIngressRule {
    /// An enabled ingress rule.
    pub fn new(target: impl Into<IngressTarget>) -> Self {
        Self {
            status: "enabled".to_string(),
            target: target.into(),
        }
    }

    pub fn rule_type(&self) -> &'static str {
        self.target.kind().as_str()
    }

    pub fn to_value(&self) -> Result<Value> {
        let mut record = to_object(&NewIngressRuleHeader {
            status: &self.status,
        })?;
        sibling::encode(&self.target, &mut record)?;
        Ok(Value::Object(record))
    }
}

impl From<&IngressRule> for NewIngressRule {
    fn from(rule: &IngressRule) -> Self {
        Self {
            status: rule.status.clone(),
            target: rule.target.clone(),
        }
    }
}
