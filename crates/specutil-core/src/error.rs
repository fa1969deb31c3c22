//! Error handling for the specutil helpers.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Resolution failures carry the
//! offending dotted path, descriptor failures carry the missing key.
//!
//! # Examples
//!
//! ```
//! use specutil_core::error::{Error, Result};
//!
//! fn might_fail(path: &str) -> Result<()> {
//!     if path.starts_with('.') {
//!         return Err(Error::RelativePath(path.to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(might_fail(".local.Widget").is_err());
//! ```

use thiserror::Error;

/// Result type for specutil operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for specutil operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dotted path starts with a separator
    #[error("Relative class path is not supported {0}")]
    RelativePath(String),

    /// Dotted path has no module portion
    #[error("Absolute module path is required {0}")]
    MissingModule(String),

    /// Dotted path contains an empty or non-identifier segment
    #[error("Invalid class path {0}")]
    InvalidPath(String),

    /// Nothing is registered under the dotted path
    #[error("Could not find {0}")]
    NotFound(String),

    /// A parameter descriptor lacks a required key
    #[error("Parameter descriptor is missing key '{0}'")]
    MissingKey(&'static str),

    /// Parents of a type cannot be linearized
    #[error("Cannot create a consistent method resolution order for {0}")]
    InconsistentHierarchy(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// True for every failure to resolve a dotted path
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            Self::RelativePath(_) | Self::MissingModule(_) | Self::InvalidPath(_) | Self::NotFound(_)
        )
    }
}
