//! Serde helpers for fields whose wire omission rules differ from serde's defaults.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (lists the server may send as `null`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}

pub(crate) fn is_empty_str(value: &&str) -> bool {
    value.is_empty()
}
