//! Configuration errors

use thiserror::Error;

/// Fatal resolution errors. Absent sources never produce one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A present value could not be converted to its declared type.
    #[error("invalid value {input:?} for `{key}`: {reason}")]
    InvalidValue { key: &'static str, input: String, reason: String },

    /// The resolved set could not be decoded into the typed record.
    #[error("unable to decode config: {0}")]
    Decode(String),
}

impl ConfigError {
    /// The setting key at fault, when the error concerns a single key.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidValue { key, .. } => Some(key),
            ConfigError::Decode(_) => None,
        }
    }
}

/// Why no configuration file path could be derived.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("error finding home directory")]
    HomeDirUnavailable,
}
