use thiserror::Error;

use crate::codec::ScalarKind;

/// Errors raised while moving typed values to and from store documents.
///
/// Shape mismatches inside a single property are not errors (the property
/// decodes to "no value"); only impossible coercions, unencodable floats and
/// malformed vertex envelopes end up here.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Cannot coerce {found} into {expected}")]
    Coercion { expected: ScalarKind, found: String },

    #[error("Cannot encode non-finite float {value} as a JSON literal")]
    NonFinite { value: f64 },

    #[error("Malformed vertex envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("Document type is {found:?}, expected \"vertex\"")]
    NotAVertex { found: String },

    #[error("Label mismatch: expected {expected}, found {found}")]
    LabelMismatch { expected: String, found: String },
}

impl CodecError {
    pub(crate) fn coercion(expected: ScalarKind, found: &serde_json::Value) -> Self {
        Self::Coercion {
            expected,
            found: found.to_string(),
        }
    }
}

/// Errors from loading or validating [`GraphConfig`](crate::config::GraphConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
