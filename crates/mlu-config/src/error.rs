//! Errors for config resolution and state-dict comparison.

use thiserror::Error;

/// mlu-config result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Config loading and interpolation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config root must be a mapping, got {0}")]
    NotAMapping(String),

    #[error("key '{key}' not found while resolving '${{{expr}}}' at '{at}'")]
    KeyNotFound {
        key: String,
        expr: String,
        at: String,
    },

    #[error("missing mandatory value at '{0}'")]
    MissingValue(String),

    #[error("interpolation cycle detected: {0}")]
    InterpolationCycle(String),

    #[error("cannot embed non-scalar '${{{expr}}}' into a string at '{at}'")]
    NonScalarInterpolation { expr: String, at: String },

    #[error("environment variable '{0}' is not set and has no default")]
    EnvNotFound(String),

    #[error("unsupported resolver '{resolver}' at '{at}'")]
    UnsupportedResolver { resolver: String, at: String },

    #[error(transparent)]
    Invalid(#[from] mlu_core::Error),

    #[error("unterminated interpolation in '{value}' at '{at}'")]
    Syntax { value: String, at: String },
}

/// First difference found between two state dicts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error(
        "the dictionaries keys are different at '{path}'.\nDict_1 keys: {left:?}\nDict_2 keys: {right:?}"
    )]
    KeySetMismatch {
        path: String,
        left: Vec<String>,
        right: Vec<String>,
    },

    #[error("the dictionaries differ at key '{path}'.\nDict_1 value: {left}\nDict_2 value: {right}")]
    ValueMismatch {
        path: String,
        left: String,
        right: String,
    },
}

impl CompareError {
    /// Key path where the difference was found.
    pub fn path(&self) -> &str {
        match self {
            CompareError::KeySetMismatch { path, .. }
            | CompareError::ValueMismatch { path, .. } => path,
        }
    }
}
