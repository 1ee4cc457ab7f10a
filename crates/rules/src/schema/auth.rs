//! Authentication sub-objects carried inside rule targets.
//!
//! AWS authentication is a polymorphic family in flat form; the Pulsar and
//! Kafka objects are fixed records.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::AuthenticationMode;
use crate::codec::flat::{self, FlatFields, FlatVariant};
use crate::error::Result;

// ── AWS ──────────────────────────────────────────────────────────────

/// How the platform authenticates against AWS for `aws/*` targets.
#[derive(Clone, PartialEq, Eq)]
pub enum AwsAuthentication {
    /// Assume an IAM role by ARN.
    AssumeRole { arn: String },
    /// Long-lived IAM user credentials.
    Credentials {
        access_key_id: String,
        secret_access_key: String,
    },
}

impl AwsAuthentication {
    pub fn assume_role(arn: impl Into<String>) -> Self {
        AwsAuthentication::AssumeRole { arn: arn.into() }
    }

    pub fn credentials(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        AwsAuthentication::Credentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// The registry entry for this value; `mode().as_str()` is the wire tag.
    pub fn mode(&self) -> AuthenticationMode {
        match self {
            AwsAuthentication::AssumeRole { .. } => AuthenticationMode::AssumeRole,
            AwsAuthentication::Credentials { .. } => AuthenticationMode::Credentials,
        }
    }

    /// Decode a standalone authentication object.
    pub fn from_value(value: Value) -> Result<Self> {
        flat::decode(value)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(flat::encode(self))
    }
}

impl FlatVariant for AwsAuthentication {
    type Kind = AuthenticationMode;

    fn kind(&self) -> AuthenticationMode {
        self.mode()
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        match self {
            AwsAuthentication::AssumeRole { arn } => vec![("assumeRoleArn", Value::from(arn.as_str()))],
            AwsAuthentication::Credentials {
                access_key_id,
                secret_access_key,
            } => vec![
                ("accessKeyId", Value::from(access_key_id.as_str())),
                ("secretAccessKey", Value::from(secret_access_key.as_str())),
            ],
        }
    }

    fn from_fields(kind: AuthenticationMode, fields: &FlatFields<'_>) -> Result<Self> {
        Ok(match kind {
            AuthenticationMode::AssumeRole => AwsAuthentication::AssumeRole {
                arn: fields.string("assumeRoleArn")?,
            },
            AuthenticationMode::Credentials => AwsAuthentication::Credentials {
                access_key_id: fields.string("accessKeyId")?,
                secret_access_key: fields.string("secretAccessKey")?,
            },
        })
    }
}

impl Serialize for AwsAuthentication {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        flat::encode(self).serialize(serializer)
    }
}

impl fmt::Debug for AwsAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwsAuthentication::AssumeRole { arn } => {
                f.debug_struct("AssumeRole").field("arn", arn).finish()
            }
            AwsAuthentication::Credentials { access_key_id, .. } => f
                .debug_struct("Credentials")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"<redacted>")
                .finish(),
        }
    }
}

// ── Pulsar ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PulsarAuthenticationMode {
    Token,
}

/// JWT authentication for Pulsar clusters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PulsarAuthentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_mode: Option<PulsarAuthenticationMode>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

// ── Kafka ────────────────────────────────────────────────────────────

/// Hash used by SASL/SCRAM.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaslMechanism {
    #[serde(rename = "plain")]
    Plain,
    #[serde(rename = "scram-sha-256")]
    ScramSha256,
    #[serde(rename = "scram-sha-512")]
    ScramSha512,
}

/// SASL/SCRAM username and password login.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sasl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<SaslMechanism>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

/// Kafka authentication, sent under the target's `auth` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KafkaAuthentication {
    #[serde(default)]
    pub sasl: Sasl,
}
