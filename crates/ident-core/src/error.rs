//! Error types for configuration loading
//!
//! The introspection engine itself has no error paths; every input yields
//! a (possibly degraded) record. Only reading configuration can fail.

use std::path::PathBuf;

/// Result type for fallible ident operations
pub type IdentResult<T> = Result<T, IdentError>;

/// Errors that can occur while loading or writing configuration
#[derive(Debug, thiserror::Error)]
pub enum IdentError {
    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is not valid TOML for `IdentConfig`
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    /// A configured pattern is unusable
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue {
        /// Config field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
