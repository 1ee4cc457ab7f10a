//! Error type for the record codecs.

use crate::schema::Family;

/// Errors produced while decoding or encoding rule records.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload does not have the expected shape or primitive types.
    #[error("malformed {path}: {source}")]
    Structural {
        /// Record section or key the failure was found in, e.g. `target.authentication`.
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A discriminator has no entry in its family's registry.
    #[error("unknown {family} \"{discriminator}\"")]
    UnknownVariant {
        family: Family,
        discriminator: String,
    },

    /// Serialization failed. Not reachable with the closed variant types.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CodecError {
    pub(crate) fn structural(path: impl Into<String>, source: serde_json::Error) -> Self {
        CodecError::Structural {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(family: Family, discriminator: &str) -> Self {
        CodecError::UnknownVariant {
            family,
            discriminator: discriminator.to_string(),
        }
    }

    /// Whether the caller can skip the offending record and carry on.
    ///
    /// Only unknown discriminators qualify: the server knows a variant this
    /// client does not. Structural failures point at a contract problem.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CodecError::UnknownVariant { .. })
    }

    /// Prefix the error path with an enclosing location (list index, parent key).
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            CodecError::Structural { path, source } => {
                let path = if path.is_empty() {
                    parent.to_string()
                } else {
                    format!("{}.{}", parent, path)
                };
                CodecError::Structural { path, source }
            }
            other => other,
        }
    }
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
