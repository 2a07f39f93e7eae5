//! Error types and result aliases for alsym operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the alsym crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all alsym operations
#[derive(Error, Debug)]
pub enum AlsymError {
    // Config errors
    #[error("Failed to parse app.json: {message}")]
    ManifestParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Feed errors
    #[error("Symbol package '{package}' not found on any configured feed")]
    PackageNotFound { package: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Archive errors
    #[error("Symbol archive for '{package}' is invalid: {reason}")]
    Archive { package: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, AlsymError>;

impl AlsymError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable (next feed can be tried)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AlsymError::Network { .. } | AlsymError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AlsymError::PackageNotFound { .. } => {
                Some("Check the dependency's publisher/name/id or add the feed that hosts it")
            },
            AlsymError::Network { .. } => Some("Check your internet connection and feed URLs"),
            AlsymError::ManifestParse { .. } => {
                Some("Validate the app.json file with a JSON linter")
            },
            AlsymError::Archive { .. } => {
                Some("The package on the feed may be corrupt; try clearing the cache")
            },
            _ => None,
        }
    }
}
