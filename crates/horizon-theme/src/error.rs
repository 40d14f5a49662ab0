//! Error types for the theming engine.
//!
//! Resolution never surfaces these to callers; they travel between the host
//! adapters and the engine, where each one is logged and turned into a
//! fallback, an absent value or a sentinel.

use std::path::PathBuf;

use crate::resource::ResourceKind;

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Errors that can occur while talking to the host or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The requested theme package is not installed.
    #[error("Package '{package}' is not installed")]
    NamespaceNotFound { package: String },

    /// A symbol is absent from a namespace.
    #[error("No {kind} resource named '{name}'")]
    ResourceNotFound { kind: ResourceKind, name: String },

    /// A value exists but cannot be decoded as the requested kind.
    #[error("Failed to decode {kind} resource '{name}': {message}")]
    Decode {
        kind: ResourceKind,
        name: String,
        message: String,
    },

    /// The host's package/capability directory could not be queried.
    #[error("Package directory query failed: {0}")]
    DirectoryQuery(String),

    /// Font data was rejected by the font parser.
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// File I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ThemeError {
    /// Create a namespace-not-found error.
    pub fn namespace_not_found(package: impl Into<String>) -> Self {
        Self::NamespaceNotFound {
            package: package.into(),
        }
    }

    /// Create a resource-not-found error.
    pub fn resource_not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(kind: ResourceKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            kind,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means "look somewhere else" rather than
    /// "something is broken".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NamespaceNotFound { .. } | Self::ResourceNotFound { .. }
        )
    }
}
