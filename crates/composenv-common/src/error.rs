//! Unified error types for the composenv workspace.
//!
//! Analysis passes report their findings as data; this enum only covers the
//! boundary operations that can genuinely fail (decoding on request, reading
//! uploads, loading configuration).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ComposenvError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The compose document is not valid YAML.
    #[error("failed to parse YAML: {message}")]
    Parse {
        /// Decoder message describing the syntax problem.
        message: String,
    },

    /// An uploaded `.env` file could not be read.
    #[error("invalid .env file: {message}")]
    EnvFile {
        /// Description of the problem.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ComposenvError>;
