//! Error handling for the mustache-embed library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for template resolution and embedding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for template resolution and embedding operations
#[derive(Debug, Error)]
pub enum Error {
    /// No template file matched the given name in any configured directory.
    ///
    /// Absolute names and names that would escape the configured directories
    /// report this same variant, so a caller cannot distinguish a traversal
    /// attempt from a plainly missing file.
    #[error("no template found for name: {0}")]
    TemplateNotFound(String),

    /// A template file was found but could not be read
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed tag usage, raised while parsing the tag itself
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new template not found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::TemplateNotFound(name.into())
    }

    /// Create a new syntax error
    pub fn syntax<S: Into<String>>(msg: S) -> Self {
        Self::Syntax(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new read error for a template that was found but unreadable
    pub fn read(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }
}
