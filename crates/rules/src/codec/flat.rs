//! Flat-form tagged unions: the discriminator and the variant's own fields
//! live side by side in a single object.
//!
//! ```json
//! {"authenticationMode": "credentials", "accessKeyId": "AKIA...", "secretAccessKey": "..."}
//! ```
//!
//! Decoding reads the object once into a string-keyed map, resolves the
//! discriminator through the family registry and then pulls the resolved
//! variant's keys out of that same map. Keys outside the variant's schema are
//! ignored and are not reproduced on encode.

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CodecError, Result};
use crate::schema::{Family, VariantKind};

/// A closed family encoded in flat form.
pub trait FlatVariant: Sized {
    type Kind: VariantKind;

    fn kind(&self) -> Self::Kind;

    /// The variant's own key/value pairs, without the discriminator.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Build the variant selected by `kind` from the keys of the object.
    fn from_fields(kind: Self::Kind, fields: &FlatFields<'_>) -> Result<Self>;
}

/// Read access to the keys of a flat object during variant decoding.
pub struct FlatFields<'a> {
    map: &'a Map<String, Value>,
}

impl FlatFields<'_> {
    /// A string key of the resolved variant. Missing and `null` keys read as empty.
    pub fn string(&self, key: &str) -> Result<String> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(value) => {
                String::deserialize(value).map_err(|e| CodecError::structural(key, e))
            }
        }
    }
}

/// Decode a flat-form object. Error paths are relative to the object itself.
pub fn decode<T: FlatVariant>(value: Value) -> Result<T> {
    let map: Map<String, Value> =
        serde_json::from_value(value).map_err(|e| CodecError::structural("", e))?;

    let family: Family = T::Kind::FAMILY;
    let field = family.discriminator_field();
    let discriminator = match map.get(field) {
        Some(tag) => String::deserialize(tag).map_err(|e| CodecError::structural(field, e))?,
        None => {
            return Err(CodecError::structural(
                field,
                serde_json::Error::missing_field(field),
            ))
        }
    };

    let kind = T::Kind::lookup(&discriminator)?;
    let decoded = T::from_fields(kind, &FlatFields { map: &map })?;

    let known: Vec<&str> = decoded.fields().iter().map(|(key, _)| *key).collect();
    let stray: Vec<&String> = map
        .keys()
        .filter(|key| key.as_str() != field && !known.contains(&key.as_str()))
        .collect();
    if !stray.is_empty() {
        debug!(%family, mode = %kind, ?stray, "ignoring keys outside the variant schema");
    }

    Ok(decoded)
}

/// Encode a value as one flat object: discriminator first, then the variant's keys.
pub fn encode<T: FlatVariant>(value: &T) -> Map<String, Value> {
    let field = T::Kind::FAMILY.discriminator_field();
    let mut map = Map::new();
    map.insert(field.to_string(), Value::from(value.kind().as_str()));
    for (key, field_value) in value.fields() {
        debug_assert_ne!(key, field, "variant key collides with the discriminator");
        map.insert(key.to_string(), field_value);
    }
    map
}
