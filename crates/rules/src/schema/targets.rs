//! Rule target catalog: one field struct per `ruleType`, closed under [`RuleTarget`].
//!
//! Omission rules follow the wire schema of each variant: empty strings and
//! empty broker lists are left out, `enveloped` and the AMQP routing flags are
//! always written, `headers` keeps the difference between `[]` and absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AwsAuthentication, Format, Header, KafkaAuthentication, PulsarAuthentication, TargetKind,
};
use crate::codec::flat;
use crate::codec::sibling::{self, SiblingVariant};
use crate::error::Result;
use crate::serde_utils::{is_zero, null_as_default};

// ── Brokers and queues ───────────────────────────────────────────────

/// `pulsar`: publish to an Apache Pulsar topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PulsarTarget {
    /// Optional partition key; supports interpolation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub routing_key: String,
    /// `{persistent|non-persistent}://tenant/namespace/topic`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub topic: String,
    /// `pulsar://host:port` or `pulsar+ssl://host:port`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_url: String,
    /// PEM-encoded CA certificates trusted for the TLS connection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tls_trust_certs: Vec<String>,
    #[serde(default)]
    pub authentication: PulsarAuthentication,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `kafka`: publish to a Kafka cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTarget {
    /// `topic:key`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub routing_key: String,
    /// `host`, `host:port` or `ip:port` of each broker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brokers: Vec<String>,
    #[serde(default, rename = "auth")]
    pub authentication: KafkaAuthentication,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `amqp`: publish to a queue hosted by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmqpTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub queue_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `amqp/external`: publish to a self-hosted AMQP broker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmqpExternalTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub routing_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exchange: String,
    /// Reject delivery when no route exists instead of dropping silently.
    #[serde(default)]
    pub mandatory_route: bool,
    #[serde(default)]
    pub persistent_messages: bool,
    /// Per-message TTL in minutes; 0 keeps the queue default.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub message_ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

// ── AWS ──────────────────────────────────────────────────────────────
//
// The authentication slot is generic so the payload can first be read with
// the flat-form object still opaque (`A = Value`) and resolved afterwards.

/// `aws/sqs`: send to an SQS queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsSqsTarget<A = AwsAuthentication> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub aws_account_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub queue_name: String,
    pub authentication: A,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `aws/kinesis`: put records on a Kinesis stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsKinesisTarget<A = AwsAuthentication> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stream_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub partition_key: String,
    pub authentication: A,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `aws/lambda`: invoke a Lambda function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsLambdaTarget<A = AwsAuthentication> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function_name: String,
    pub authentication: A,
    #[serde(default)]
    pub enveloped: bool,
}

fn resolve_authentication(raw: Value) -> Result<AwsAuthentication> {
    flat::decode(raw).map_err(|e| e.within("authentication"))
}

impl AwsSqsTarget<Value> {
    fn resolve(self) -> Result<AwsSqsTarget> {
        Ok(AwsSqsTarget {
            region: self.region,
            aws_account_id: self.aws_account_id,
            queue_name: self.queue_name,
            authentication: resolve_authentication(self.authentication)?,
            enveloped: self.enveloped,
            format: self.format,
        })
    }
}

impl AwsKinesisTarget<Value> {
    fn resolve(self) -> Result<AwsKinesisTarget> {
        Ok(AwsKinesisTarget {
            region: self.region,
            stream_name: self.stream_name,
            partition_key: self.partition_key,
            authentication: resolve_authentication(self.authentication)?,
            enveloped: self.enveloped,
            format: self.format,
        })
    }
}

impl AwsLambdaTarget<Value> {
    fn resolve(self) -> Result<AwsLambdaTarget> {
        Ok(AwsLambdaTarget {
            region: self.region,
            function_name: self.function_name,
            authentication: resolve_authentication(self.authentication)?,
            enveloped: self.enveloped,
        })
    }
}

// ── HTTP ─────────────────────────────────────────────────────────────

/// `http`: POST to a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    /// API key used to sign batched payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `http/google-cloud-function`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpGoogleCloudFunctionTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `http/azure-function`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpAzureFunctionTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub azure_app_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub azure_function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub enveloped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

/// `http/cloudflare-worker`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpCloudflareWorkerTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
}

/// `http/zapier`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpZapierTarget {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
}

/// `http/ifttt`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIftttTarget {
    /// Key from the IFTTT webhook service page.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub webhook_key: String,
    /// Must match the name of the receiving applet.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event_name: String,
}

// ── The closed family ────────────────────────────────────────────────

/// Where a rule delivers events. Exactly one variant per rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleTarget {
    Pulsar(PulsarTarget),
    Kafka(KafkaTarget),
    Amqp(AmqpTarget),
    AmqpExternal(AmqpExternalTarget),
    AwsSqs(AwsSqsTarget),
    AwsKinesis(AwsKinesisTarget),
    AwsLambda(AwsLambdaTarget),
    Http(HttpTarget),
    HttpAzureFunction(HttpAzureFunctionTarget),
    HttpGoogleCloudFunction(HttpGoogleCloudFunctionTarget),
    HttpCloudflareWorker(HttpCloudflareWorkerTarget),
    HttpZapier(HttpZapierTarget),
    HttpIfttt(HttpIftttTarget),
}

impl RuleTarget {
    /// Registry entry of this target; `kind().as_str()` is the `ruleType`.
    pub fn kind(&self) -> TargetKind {
        match self {
            RuleTarget::Pulsar(_) => TargetKind::Pulsar,
            RuleTarget::Kafka(_) => TargetKind::Kafka,
            RuleTarget::Amqp(_) => TargetKind::Amqp,
            RuleTarget::AmqpExternal(_) => TargetKind::AmqpExternal,
            RuleTarget::AwsSqs(_) => TargetKind::AwsSqs,
            RuleTarget::AwsKinesis(_) => TargetKind::AwsKinesis,
            RuleTarget::AwsLambda(_) => TargetKind::AwsLambda,
            RuleTarget::Http(_) => TargetKind::Http,
            RuleTarget::HttpAzureFunction(_) => TargetKind::HttpAzureFunction,
            RuleTarget::HttpGoogleCloudFunction(_) => TargetKind::HttpGoogleCloudFunction,
            RuleTarget::HttpCloudflareWorker(_) => TargetKind::HttpCloudflareWorker,
            RuleTarget::HttpZapier(_) => TargetKind::HttpZapier,
            RuleTarget::HttpIfttt(_) => TargetKind::HttpIfttt,
        }
    }

    /// The embedded AWS authentication, for `aws/*` targets.
    pub fn aws_authentication(&self) -> Option<&AwsAuthentication> {
        match self {
            RuleTarget::AwsSqs(t) => Some(&t.authentication),
            RuleTarget::AwsKinesis(t) => Some(&t.authentication),
            RuleTarget::AwsLambda(t) => Some(&t.authentication),
            _ => None,
        }
    }

    pub fn aws_authentication_mut(&mut self) -> Option<&mut AwsAuthentication> {
        match self {
            RuleTarget::AwsSqs(t) => Some(&mut t.authentication),
            RuleTarget::AwsKinesis(t) => Some(&mut t.authentication),
            RuleTarget::AwsLambda(t) => Some(&mut t.authentication),
            _ => None,
        }
    }

    /// Custom headers, for targets that support them.
    pub fn headers(&self) -> Option<&[Header]> {
        match self {
            RuleTarget::Amqp(t) => t.headers.as_deref(),
            RuleTarget::AmqpExternal(t) => t.headers.as_deref(),
            RuleTarget::Http(t) => t.headers.as_deref(),
            RuleTarget::HttpAzureFunction(t) => t.headers.as_deref(),
            RuleTarget::HttpGoogleCloudFunction(t) => t.headers.as_deref(),
            RuleTarget::HttpCloudflareWorker(t) => t.headers.as_deref(),
            RuleTarget::HttpZapier(t) => t.headers.as_deref(),
            _ => None,
        }
    }
}

impl SiblingVariant for RuleTarget {
    type Kind = TargetKind;

    fn kind(&self) -> TargetKind {
        RuleTarget::kind(self)
    }

    fn decode_payload(kind: TargetKind, payload: Value) -> Result<Self> {
        Ok(match kind {
            TargetKind::Pulsar => RuleTarget::Pulsar(sibling::payload(payload)?),
            TargetKind::Kafka => RuleTarget::Kafka(sibling::payload(payload)?),
            TargetKind::Amqp => RuleTarget::Amqp(sibling::payload(payload)?),
            TargetKind::AmqpExternal => RuleTarget::AmqpExternal(sibling::payload(payload)?),
            TargetKind::AwsSqs => {
                RuleTarget::AwsSqs(sibling::payload::<AwsSqsTarget<Value>>(payload)?.resolve()?)
            }
            TargetKind::AwsKinesis => RuleTarget::AwsKinesis(
                sibling::payload::<AwsKinesisTarget<Value>>(payload)?.resolve()?,
            ),
            TargetKind::AwsLambda => RuleTarget::AwsLambda(
                sibling::payload::<AwsLambdaTarget<Value>>(payload)?.resolve()?,
            ),
            TargetKind::Http => RuleTarget::Http(sibling::payload(payload)?),
            TargetKind::HttpAzureFunction => {
                RuleTarget::HttpAzureFunction(sibling::payload(payload)?)
            }
            TargetKind::HttpGoogleCloudFunction => {
                RuleTarget::HttpGoogleCloudFunction(sibling::payload(payload)?)
            }
            TargetKind::HttpCloudflareWorker => {
                RuleTarget::HttpCloudflareWorker(sibling::payload(payload)?)
            }
            TargetKind::HttpZapier => RuleTarget::HttpZapier(sibling::payload(payload)?),
            TargetKind::HttpIfttt => RuleTarget::HttpIfttt(sibling::payload(payload)?),
        })
    }

    fn encode_payload(&self) -> Result<Value> {
        match self {
            RuleTarget::Pulsar(t) => sibling::to_payload(t),
            RuleTarget::Kafka(t) => sibling::to_payload(t),
            RuleTarget::Amqp(t) => sibling::to_payload(t),
            RuleTarget::AmqpExternal(t) => sibling::to_payload(t),
            RuleTarget::AwsSqs(t) => sibling::to_payload(t),
            RuleTarget::AwsKinesis(t) => sibling::to_payload(t),
            RuleTarget::AwsLambda(t) => sibling::to_payload(t),
            RuleTarget::Http(t) => sibling::to_payload(t),
            RuleTarget::HttpAzureFunction(t) => sibling::to_payload(t),
            RuleTarget::HttpGoogleCloudFunction(t) => sibling::to_payload(t),
            RuleTarget::HttpCloudflareWorker(t) => sibling::to_payload(t),
            RuleTarget::HttpZapier(t) => sibling::to_payload(t),
            RuleTarget::HttpIfttt(t) => sibling::to_payload(t),
        }
    }
}

macro_rules! impl_from_target {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for RuleTarget {
                fn from(target: $ty) -> Self {
                    RuleTarget::$variant(target)
                }
            }
        )*
    };
}

impl_from_target!(
    Pulsar(PulsarTarget),
    Kafka(KafkaTarget),
    Amqp(AmqpTarget),
    AmqpExternal(AmqpExternalTarget),
    AwsSqs(AwsSqsTarget),
    AwsKinesis(AwsKinesisTarget),
    AwsLambda(AwsLambdaTarget),
    Http(HttpTarget),
    HttpAzureFunction(HttpAzureFunctionTarget),
    HttpGoogleCloudFunction(HttpGoogleCloudFunctionTarget),
    HttpCloudflareWorker(HttpCloudflareWorkerTarget),
    HttpZapier(HttpZapierTarget),
    HttpIfttt(HttpIftttTarget),
);
