//! Configurator error types.
//!
//! Nothing in the core is fatal.  These errors exist so storage and decoding
//! problems can be reported and logged before the caller substitutes a safe
//! default (see [`crate::persist::load`]).

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ConfiguratorError {
    /// Reading or writing the backing store failed.
    Storage {
        /// Key being read or written.
        key: String,
        source: io::Error,
    },

    /// The stored text is not valid TOML, or does not decode into a record.
    Parse(String),

    /// The record could not be encoded.
    Serialize(String),

    /// The stored TOML root is not a table.
    InvalidRoot,

    /// The record was written by a newer schema than this build understands.
    UnsupportedVersion {
        found: i64,
        expected: u32,
    },
}

impl fmt::Display for ConfiguratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfiguratorError::Storage { key, source } => {
                write!(f, "storage access for '{}' failed: {}", key, source)
            }
            ConfiguratorError::Parse(msg) => {
                write!(f, "failed to parse stored configuration: {}", msg)
            }
            ConfiguratorError::Serialize(msg) => {
                write!(f, "failed to serialize configuration: {}", msg)
            }
            ConfiguratorError::InvalidRoot => {
                write!(f, "stored configuration root must be a TOML table")
            }
            ConfiguratorError::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported configuration version {} (expected at most {})",
                found, expected
            ),
        }
    }
}

impl std::error::Error for ConfiguratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfiguratorError::Storage { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `ConfiguratorError` as the error type.
pub type ConfiguratorResult<T> = Result<T, ConfiguratorError>;
