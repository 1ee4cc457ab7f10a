//! Byte-level entry points for rule and ingress rule records.
//!
//! Single records and lists decode strictly: the first failure aborts.
//! [`decode_rule_batch`] is the lenient variant for listings, where a rule
//! type this client does not know yet should not hide every other rule.

pub mod flat;
pub mod sibling;

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{CodecError, Result};
use crate::schema::{IngressRule, NewIngressRule, NewRule, Rule};

/// Serialize a record header into the object the payload is added to.
pub(crate) fn to_object<T: Serialize>(header: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(header).map_err(CodecError::Encode)? {
        Value::Object(map) => Ok(map),
        _ => Err(CodecError::Encode(serde_json::Error::custom(
            "record header did not serialize to an object",
        ))),
    }
}

/// Deserialize `value`, naming the failing field in the error path.
///
/// Paths use dots for keys and brackets for indices (`headers[0].name`).
/// A failure on `value` itself, such as a missing field, is reported at `root`.
pub(crate) fn from_value<T: DeserializeOwned>(value: Value, root: &str) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = if e.path().iter().next().is_none() {
            root.to_string()
        } else {
            e.path().to_string()
        };
        CodecError::structural(path, e.into_inner())
    })
}

fn parse(input: &[u8]) -> Result<Value> {
    serde_json::from_slice(input).map_err(|e| CodecError::structural("", e))
}

fn parse_list(input: &[u8]) -> Result<Vec<Value>> {
    serde_json::from_slice(input).map_err(|e| CodecError::structural("", e))
}

fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(CodecError::Encode)
}

/// Decode one rule record.
pub fn decode_rule(input: &[u8]) -> Result<Rule> {
    let rule = Rule::from_value(parse(input)?)?;
    debug!(id = %rule.id, rule_type = rule.rule_type(), "decoded rule");
    Ok(rule)
}

/// Encode a rule with `ruleType` and `target` as siblings.
pub fn encode_rule(rule: &Rule) -> Result<Vec<u8>> {
    to_bytes(&rule.to_value()?)
}

/// Encode the body of a create or update request.
pub fn encode_new_rule(rule: &NewRule) -> Result<Vec<u8>> {
    to_bytes(&rule.to_value()?)
}

pub fn decode_ingress_rule(input: &[u8]) -> Result<IngressRule> {
    let rule = IngressRule::from_value(parse(input)?)?;
    debug!(id = %rule.id, rule_type = rule.rule_type(), "decoded ingress rule");
    Ok(rule)
}

pub fn encode_ingress_rule(rule: &IngressRule) -> Result<Vec<u8>> {
    to_bytes(&rule.to_value()?)
}

pub fn encode_new_ingress_rule(rule: &NewIngressRule) -> Result<Vec<u8>> {
    to_bytes(&rule.to_value()?)
}

/// Decode a JSON array of rules. Error paths are prefixed with the element index.
pub fn decode_rules(input: &[u8]) -> Result<Vec<Rule>> {
    decode_list(input, Rule::from_value)
}

pub fn decode_ingress_rules(input: &[u8]) -> Result<Vec<IngressRule>> {
    decode_list(input, IngressRule::from_value)
}

fn decode_list<T>(input: &[u8], decode: impl Fn(Value) -> Result<T>) -> Result<Vec<T>> {
    parse_list(input)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode(value).map_err(|e| e.within(&format!("[{index}]"))))
        .collect()
}

/// Outcome of a lenient list decode.
#[derive(Debug)]
pub struct BatchDecode<T> {
    /// Records that decoded, in input order.
    pub records: Vec<T>,
    /// Index and cause of each record that was skipped.
    pub skipped: Vec<(usize, CodecError)>,
}

impl<T> BatchDecode<T> {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decode a JSON array of rules, skipping records whose rule type or
/// authentication mode is unknown. Structural failures still abort.
pub fn decode_rule_batch(input: &[u8]) -> Result<BatchDecode<Rule>> {
    let values = parse_list(input)?;
    let mut batch = BatchDecode {
        records: Vec::with_capacity(values.len()),
        skipped: Vec::new(),
    };

    for (index, value) in values.into_iter().enumerate() {
        match Rule::from_value(value) {
            Ok(rule) => batch.records.push(rule),
            Err(e) if e.is_recoverable() => {
                warn!(index, error = %e, "skipping rule");
                batch.skipped.push((index, e));
            }
            Err(e) => return Err(e.within(&format!("[{index}]"))),
        }
    }

    debug!(
        decoded = batch.records.len(),
        skipped = batch.skipped.len(),
        "decoded rule batch"
    );
    Ok(batch)
}
