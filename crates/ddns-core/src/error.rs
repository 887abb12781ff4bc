//! Error types for the DDNS updater
//!
//! Every failure of a run falls into one of these variants. The binary maps
//! all of them to a non-zero exit code.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Every public IP service failed or returned an unusable answer
    #[error("Failed to resolve public IP address from all services: {}", attempted.join(", "))]
    Resolution {
        /// Services that were tried, in priority order
        attempted: Vec<String>,
    },

    /// The DNS provider rejected the change request
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message reported by the provider
        message: String,
    },

    /// Any other failure while talking to the provider
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a resolution error listing the attempted services
    pub fn resolution(attempted: Vec<String>) -> Self {
        Self::Resolution { attempted }
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
