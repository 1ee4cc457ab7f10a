//! Discriminator registries for the three polymorphic families.
//!
//! Each family is a closed enum of wire discriminators. Decoding parses the
//! discriminator into its kind (string → variant lookup); encoding asks the
//! value for its kind (variant → string). Catalogs are `const` and immutable.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// A discriminator namespace. Families never share a registry: `"http"` is a
/// rule type and means nothing to the ingress family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    RuleTarget,
    IngressTarget,
    AwsAuthentication,
}

impl Family {
    pub const ALL: &'static [Family] = &[
        Family::RuleTarget,
        Family::IngressTarget,
        Family::AwsAuthentication,
    ];

    /// Wire field that carries this family's discriminator.
    pub fn discriminator_field(self) -> &'static str {
        match self {
            Family::RuleTarget | Family::IngressTarget => "ruleType",
            Family::AwsAuthentication => "authenticationMode",
        }
    }

    /// Every discriminator registered for this family, in catalog order.
    pub fn discriminators(self) -> Vec<&'static str> {
        match self {
            Family::RuleTarget => names::<TargetKind>(),
            Family::IngressTarget => names::<IngressTargetKind>(),
            Family::AwsAuthentication => names::<AuthenticationMode>(),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::RuleTarget => write!(f, "rule type"),
            Family::IngressTarget => write!(f, "ingress rule type"),
            Family::AwsAuthentication => write!(f, "authentication mode"),
        }
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rule" | "rule-target" => Ok(Family::RuleTarget),
            "ingress" | "ingress-target" => Ok(Family::IngressTarget),
            "aws" | "aws-authentication" => Ok(Family::AwsAuthentication),
            other => Err(format!("unknown family: '{}'", other)),
        }
    }
}

/// One registry: a closed set of kinds and their wire discriminators.
pub trait VariantKind: Copy + Eq + fmt::Display + FromStr<Err = CodecError> + 'static {
    const FAMILY: Family;
    /// Catalog order; each entry appears exactly once.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Resolve a discriminator, failing with [`CodecError::UnknownVariant`].
    fn lookup(discriminator: &str) -> Result<Self, CodecError> {
        discriminator.parse()
    }
}

fn names<K: VariantKind>() -> Vec<&'static str> {
    K::ALL.iter().map(|k| k.as_str()).collect()
}

// ── Rule targets ─────────────────────────────────────────────────────

/// Discriminators of the rule-target family (`ruleType` on a rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Pulsar,
    Kafka,
    Amqp,
    AmqpExternal,
    AwsSqs,
    AwsKinesis,
    AwsLambda,
    Http,
    HttpAzureFunction,
    HttpGoogleCloudFunction,
    HttpCloudflareWorker,
    HttpZapier,
    HttpIfttt,
}

impl TargetKind {
    /// Whether the target embeds an AWS authentication object.
    pub fn embeds_aws_authentication(self) -> bool {
        matches!(
            self,
            TargetKind::AwsSqs | TargetKind::AwsKinesis | TargetKind::AwsLambda
        )
    }
}

impl VariantKind for TargetKind {
    const FAMILY: Family = Family::RuleTarget;
    const ALL: &'static [Self] = &[
        TargetKind::Pulsar,
        TargetKind::Kafka,
        TargetKind::Amqp,
        TargetKind::AmqpExternal,
        TargetKind::AwsSqs,
        TargetKind::AwsKinesis,
        TargetKind::AwsLambda,
        TargetKind::Http,
        TargetKind::HttpAzureFunction,
        TargetKind::HttpGoogleCloudFunction,
        TargetKind::HttpCloudflareWorker,
        TargetKind::HttpZapier,
        TargetKind::HttpIfttt,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TargetKind::Pulsar => "pulsar",
            TargetKind::Kafka => "kafka",
            TargetKind::Amqp => "amqp",
            TargetKind::AmqpExternal => "amqp/external",
            TargetKind::AwsSqs => "aws/sqs",
            TargetKind::AwsKinesis => "aws/kinesis",
            TargetKind::AwsLambda => "aws/lambda",
            TargetKind::Http => "http",
            TargetKind::HttpAzureFunction => "http/azure-function",
            TargetKind::HttpGoogleCloudFunction => "http/google-cloud-function",
            TargetKind::HttpCloudflareWorker => "http/cloudflare-worker",
            TargetKind::HttpZapier => "http/zapier",
            TargetKind::HttpIfttt => "http/ifttt",
        }
    }
}

impl FromStr for TargetKind {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pulsar" => Ok(TargetKind::Pulsar),
            "kafka" => Ok(TargetKind::Kafka),
            "amqp" => Ok(TargetKind::Amqp),
            "amqp/external" => Ok(TargetKind::AmqpExternal),
            "aws/sqs" => Ok(TargetKind::AwsSqs),
            "aws/kinesis" => Ok(TargetKind::AwsKinesis),
            "aws/lambda" => Ok(TargetKind::AwsLambda),
            "http" => Ok(TargetKind::Http),
            "http/azure-function" => Ok(TargetKind::HttpAzureFunction),
            "http/google-cloud-function" => Ok(TargetKind::HttpGoogleCloudFunction),
            "http/cloudflare-worker" => Ok(TargetKind::HttpCloudflareWorker),
            "http/zapier" => Ok(TargetKind::HttpZapier),
            "http/ifttt" => Ok(TargetKind::HttpIfttt),
            other => Err(CodecError::unknown(Self::FAMILY, other)),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Ingress targets ──────────────────────────────────────────────────

/// Discriminators of the ingress-target family (`ruleType` on an ingress rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngressTargetKind {
    Mongo,
    PostgresOutbox,
}

impl VariantKind for IngressTargetKind {
    const FAMILY: Family = Family::IngressTarget;
    const ALL: &'static [Self] = &[IngressTargetKind::Mongo, IngressTargetKind::PostgresOutbox];

    fn as_str(self) -> &'static str {
        match self {
            IngressTargetKind::Mongo => "ingress/mongodb",
            IngressTargetKind::PostgresOutbox => "ingress-postgres-outbox",
        }
    }
}

impl FromStr for IngressTargetKind {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ingress/mongodb" => Ok(IngressTargetKind::Mongo),
            "ingress-postgres-outbox" => Ok(IngressTargetKind::PostgresOutbox),
            other => Err(CodecError::unknown(Self::FAMILY, other)),
        }
    }
}

impl fmt::Display for IngressTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AWS authentication ───────────────────────────────────────────────

/// Discriminators of the AWS authentication family (`authenticationMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthenticationMode {
    AssumeRole,
    Credentials,
}

impl VariantKind for AuthenticationMode {
    const FAMILY: Family = Family::AwsAuthentication;
    const ALL: &'static [Self] = &[AuthenticationMode::AssumeRole, AuthenticationMode::Credentials];

    fn as_str(self) -> &'static str {
        match self {
            AuthenticationMode::AssumeRole => "assumeRole",
            AuthenticationMode::Credentials => "credentials",
        }
    }
}

impl FromStr for AuthenticationMode {
    type Err = CodecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "assumeRole" => Ok(AuthenticationMode::AssumeRole),
            "credentials" => Ok(AuthenticationMode::Credentials),
            other => Err(CodecError::unknown(Self::FAMILY, other)),
        }
    }
}

impl fmt::Display for AuthenticationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
