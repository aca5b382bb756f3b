//! Unified error types for the mcpbake workspace.
//!
//! Only conditions that abort an invocation are represented here. Dangling
//! group references and Dockerfiles without `EXPOSE` are not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BakeError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A required input file or directory does not exist.
    #[error("{kind} not found: {path}")]
    MissingInput {
        /// What kind of input was expected (e.g. "bake file").
        kind: &'static str,
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Descriptor text does not follow the block grammar.
    #[error("syntax error: {message}")]
    Syntax {
        /// Description of the grammar violation.
        message: String,
    },

    /// A descriptor file could not be parsed.
    #[error("malformed bake file {path}: {message}")]
    MalformedDescriptor {
        /// Path of the offending descriptor.
        path: PathBuf,
        /// Parse failure reported by the parser.
        message: String,
    },

    /// An optional config file exists but does not have the expected shape.
    #[error("invalid config {path}: {message}")]
    InvalidConfig {
        /// Path of the offending config file.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {source}")]
    Json {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying serialization error.
        #[from]
        source: serde_yaml::Error,
    },
}

impl BakeError {
    /// Builds an [`BakeError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BakeError>;
