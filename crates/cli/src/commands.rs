use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use ably_control_core::{ApiError, Config, ControlError};
use ably_control_rules::{
    AuthenticationMode, Family, IngressRule, IngressTargetKind, Rule, TargetKind, VariantKind,
};

use crate::diff::{self, Change};

/// One input record after a decode/encode cycle.
#[derive(Debug)]
pub struct Decoded {
    /// `<ruleType> <id>`, plus the authentication mode for AWS targets.
    pub summary: String,
    pub original: Value,
    pub encoded: Value,
}

impl Decoded {
    pub fn changes(&self) -> Vec<Change> {
        diff::changes(&self.original, &self.encoded)
    }
}

/// Read the whole input; `-` means stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Decode one record or an array of records.
pub fn decode_input(input: &[u8], ingress: bool) -> Result<Vec<Decoded>> {
    let parsed: Value = serde_json::from_slice(input).context("input is not valid JSON")?;
    if let Some(err) = as_api_error(&parsed, input) {
        return Err(ControlError::from(err)).context("input is an API error response");
    }

    let records = match parsed {
        Value::Array(items) => items,
        single => vec![single],
    };
    debug!(count = records.len(), ingress, "decoding records");

    records
        .into_iter()
        .enumerate()
        .map(|(index, original)| {
            let decoded = if ingress {
                decode_ingress(original)
            } else {
                decode_rule(original)
            };
            decoded.with_context(|| format!("record {}", index))
        })
        .collect()
}

fn decode_rule(original: Value) -> Result<Decoded> {
    let rule = Rule::from_value(original.clone())?;
    let mut summary = format!("{} {}", rule.rule_type(), rule.id);
    if let Some(auth) = rule.target.aws_authentication() {
        summary.push_str(&format!(" (authenticationMode: {})", auth.mode()));
    }
    Ok(Decoded {
        summary,
        encoded: rule.to_value()?,
        original,
    })
}

fn decode_ingress(original: Value) -> Result<Decoded> {
    let rule = IngressRule::from_value(original.clone())?;
    Ok(Decoded {
        summary: format!("{} {}", rule.rule_type(), rule.id),
        encoded: rule.to_value()?,
        original,
    })
}

/// Error bodies carry `statusCode` and `code` but never `ruleType`.
fn as_api_error(parsed: &Value, raw: &[u8]) -> Option<ApiError> {
    let object = parsed.as_object()?;
    if object.contains_key("ruleType") || !object.contains_key("statusCode") {
        return None;
    }
    let status = object
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(0);
    Some(ApiError::from_response("-", status, raw))
}

/// Lines printed by `kinds`.
pub fn kinds(family: Option<Family>) -> Vec<String> {
    let families: Vec<Family> = match family {
        Some(f) => vec![f],
        None => Family::ALL.to_vec(),
    };
    let mut lines = Vec::new();
    for family in families {
        lines.push(format!("{} ({}):", family, family.discriminator_field()));
        lines.extend(family.discriminators().into_iter().map(|d| format!("  {}", d)));
    }
    lines
}

/// Resolved configuration, redacted, as pretty JSON.
pub fn show_config(profile: &str) -> Result<String> {
    let config = Config::for_profile(profile);
    config.validate()?;
    config.log_summary();
    Ok(serde_json::to_string_pretty(&config.redacted_summary())?)
}

/// Families whose registry contains `discriminator`.
pub fn families_of(discriminator: &str) -> Vec<Family> {
    Family::ALL
        .iter()
        .copied()
        .filter(|family| match family {
            Family::RuleTarget => TargetKind::lookup(discriminator).is_ok(),
            Family::IngressTarget => IngressTargetKind::lookup(discriminator).is_ok(),
            Family::AwsAuthentication => AuthenticationMode::lookup(discriminator).is_ok(),
        })
        .collect()
}
