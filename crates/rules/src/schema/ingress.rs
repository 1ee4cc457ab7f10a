//! Ingress target catalog: database sources that feed channels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::IngressTargetKind;
use crate::codec::sibling::{self, SiblingVariant};
use crate::error::Result;

/// `ingress/mongodb`: follow a MongoDB change stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MongoTarget {
    /// Connection URL of the MongoDB deployment.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub database: String,
    /// Collection whose change stream is watched.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collection: String,
    /// Aggregation pipeline, as a JSON string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pipeline: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_document: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_document_before_change: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_site: String,
}

/// `ingress-postgres-outbox`: publish rows written to an outbox table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostgresOutboxTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub outbox_table_schema: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub outbox_table_name: String,
    /// Schema of the table the connector nodes coordinate through.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nodes_table_schema: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nodes_table_name: String,
    /// `prefer` (server default), `require`, `verify-ca` or `verify-full`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssl_mode: String,
    /// CA certificates; needed for `verify-ca` and `verify-full`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssl_root_cert: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub primary_site: String,
}

/// Where an ingress rule reads from. Exactly one variant per rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngressTarget {
    Mongo(MongoTarget),
    PostgresOutbox(PostgresOutboxTarget),
}

impl IngressTarget {
    pub fn kind(&self) -> IngressTargetKind {
        match self {
            IngressTarget::Mongo(_) => IngressTargetKind::Mongo,
            IngressTarget::PostgresOutbox(_) => IngressTargetKind::PostgresOutbox,
        }
    }
}

impl SiblingVariant for IngressTarget {
    type Kind = IngressTargetKind;

    fn kind(&self) -> IngressTargetKind {
        IngressTarget::kind(self)
    }

    fn decode_payload(kind: IngressTargetKind, payload: Value) -> Result<Self> {
        Ok(match kind {
            IngressTargetKind::Mongo => IngressTarget::Mongo(sibling::payload(payload)?),
            IngressTargetKind::PostgresOutbox => {
                IngressTarget::PostgresOutbox(sibling::payload(payload)?)
            }
        })
    }

    fn encode_payload(&self) -> Result<Value> {
        match self {
            IngressTarget::Mongo(t) => sibling::to_payload(t),
            IngressTarget::PostgresOutbox(t) => sibling::to_payload(t),
        }
    }
}

impl From<MongoTarget> for IngressTarget {
    fn from(target: MongoTarget) -> Self {
        IngressTarget::Mongo(target)
    }
}

impl From<PostgresOutboxTarget> for IngressTarget {
    fn from(target: PostgresOutboxTarget) -> Self {
        IngressTarget::PostgresOutbox(target)
    }
}
