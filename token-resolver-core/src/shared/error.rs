//! Error handling for the token resolver core
//!
//! Two layers of errors live here. `ResolveError` is the only thing the
//! resolution entry point surfaces to callers. `TokenError` is what the
//! collaborators (transports, fetchers, stores, configuration) report.

use thiserror::Error;

/// Failure kinds surfaced by token resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid token reference: {0}")]
    InvalidReference(String),

    #[error("Token not found: {0}")]
    NotFound(String),
}

impl ResolveError {
    /// Create an invalid reference error
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Self::InvalidReference(reference.into())
    }

    /// Create a not found error
    pub fn not_found(reference: impl Into<String>) -> Self {
        Self::NotFound(reference.into())
    }
}

/// Collaborator error type
#[derive(Error, Debug, Clone)]
pub enum TokenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl TokenError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<reqwest::Error> for TokenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(format!("Response body error: {}", err))
        } else {
            Self::network(format!("HTTP error: {}", err))
        }
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

impl From<hex::FromHexError> for TokenError {
    fn from(err: hex::FromHexError) -> Self {
        Self::decode(format!("Hex decoding error: {}", err))
    }
}

impl From<config::ConfigError> for TokenError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}
