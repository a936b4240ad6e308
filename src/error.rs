//! Ged error types.
//!
//! All errors are typed and provide root cause information.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Ged operations.
#[derive(Error, Debug)]
pub enum GedError {
    /// The query text could not be compiled.
    #[error("{message}")]
    InvalidPattern {
        /// The pattern text as given by the caller.
        pattern: String,
        /// What is wrong with it.
        message: String,
    },

    /// A module could not be loaded or did not type-check.
    #[error("load {module}: {message}")]
    Load {
        /// The module identifier that failed.
        module: String,
        /// The loader's diagnostic.
        message: String,
    },

    /// I/O error during file operations.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GedError {
    /// Build an `InvalidPattern` error.
    pub fn invalid_pattern(pattern: &str, message: impl Into<String>) -> Self {
        GedError::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    /// Build a `Load` error.
    pub fn load(module: &str, message: impl Into<String>) -> Self {
        GedError::Load {
            module: module.to_string(),
            message: message.into(),
        }
    }

    /// Stable identifier for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            GedError::InvalidPattern { .. } => "InvalidPattern",
            GedError::Load { .. } => "Load",
            GedError::Io { .. } => "Io",
        }
    }

    /// Remediation hint shown next to the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GedError::InvalidPattern { .. } => {
                Some("expected <pkg path>:<ident>[:<field>|:<method>()]")
            }
            GedError::Load { .. } => {
                Some("regenerate the semantic dump; modules with type errors are not analysed")
            }
            GedError::Io { .. } => None,
        }
    }
}

/// Result type alias for Ged operations.
pub type Result<T> = std::result::Result<T, GedError>;
