//! Sibling-form tagged unions: the discriminator sits next to the payload
//! field in the enclosing record instead of inside it.
//!
//! ```json
//! {"ruleType": "kafka", "target": {"brokers": ["a:9092"], "enveloped": true}}
//! ```
//!
//! The enclosing record is decoded first with the payload left as an opaque
//! [`Value`]; only once the discriminator has been resolved through the
//! registry is the payload bound to a concrete variant.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CodecError, Result};
use crate::schema::VariantKind;

/// Record key holding the polymorphic payload.
pub const PAYLOAD_FIELD: &str = "target";

/// A closed family encoded in sibling form.
pub trait SiblingVariant: Sized {
    type Kind: VariantKind;

    fn kind(&self) -> Self::Kind;

    /// Bind an uninterpreted payload to the variant selected by `kind`.
    /// Error paths are relative to the payload object.
    fn decode_payload(kind: Self::Kind, payload: Value) -> Result<Self>;

    /// The payload object, without the discriminator.
    fn encode_payload(&self) -> Result<Value>;
}

/// Resolve `discriminator` and decode `payload` as that variant.
///
/// An unknown discriminator fails before the payload is looked at.
pub fn decode<T: SiblingVariant>(discriminator: &str, payload: Value) -> Result<T> {
    let kind = T::Kind::lookup(discriminator)?;
    T::decode_payload(kind, payload).map_err(|e| e.within(PAYLOAD_FIELD))
}

/// Write the discriminator and the payload into the enclosing record.
pub fn encode<T: SiblingVariant>(value: &T, record: &mut Map<String, Value>) -> Result<()> {
    let field = T::Kind::FAMILY.discriminator_field();
    let payload = value.encode_payload()?;
    debug_assert!(
        payload.get(field).is_none(),
        "payload must not carry the discriminator"
    );
    record.insert(field.to_string(), Value::from(value.kind().as_str()));
    record.insert(PAYLOAD_FIELD.to_string(), payload);
    Ok(())
}

/// Decode a payload object into a variant's field struct.
pub(crate) fn payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    super::from_value(payload, "")
}

/// Encode a variant's field struct as a payload object.
pub(crate) fn to_payload<T: Serialize>(fields: &T) -> Result<Value> {
    serde_json::to_value(fields).map_err(CodecError::Encode)
}
