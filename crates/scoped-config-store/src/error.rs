//! Error type for the store crate.
//!
//! Lookups and mutations on the store never fail; errors only arise at the
//! edges: typed reads whose value has the wrong shape, and fixture files that
//! cannot be read, parsed, or validated.

use std::path::PathBuf;

use scoped_config_core::KeyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred while reading a fixture.
    #[error("I/O error accessing fixture at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fixture TOML could not be parsed.
    #[error("failed to parse fixture TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key in the fixture is not a well-formed dotted path.
    #[error("invalid configuration key: {0}")]
    InvalidKey(#[from] KeyError),

    /// A resource entry in the fixture has an empty path.
    #[error("invalid resource path: {0:?}")]
    InvalidResource(String),

    /// A value exists but does not deserialize into the requested type.
    #[error("value for '{key}' has an unexpected type: {source}")]
    TypeMismatch {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
