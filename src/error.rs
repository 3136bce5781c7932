//! Custom error types for Aegis
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Aegis operations
#[derive(Error, Debug)]
pub enum AegisError {
    /// Missing or empty input, caught before the core is called
    #[error("Input error: {0}")]
    Input(String),

    /// Token is not valid base64url or is too short to hold salt and IV
    #[error("Invalid token: {0}")]
    TokenFormat(String),

    /// Wrong passphrase or corrupted token. Deliberately carries no detail.
    #[error("Decryption failed: check your key or token")]
    Decryption,

    /// The key derivation primitive failed
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// The secure random source is unavailable
    #[error("Environment error: {0}")]
    Environment(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl AegisError {
    /// Create an input error for a missing field
    pub fn missing(what: &str) -> Self {
        Self::Input(format!("Please enter {}", what))
    }

    /// Check if this is a decryption error
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption)
    }

    /// Check if this is a token format error
    pub fn is_token_format(&self) -> bool {
        matches!(self, Self::TokenFormat(_))
    }

    /// Whether the user can fix this by retrying with different input
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::TokenFormat(_) | Self::Decryption
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AegisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AegisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for AegisError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for Aegis operations
pub type AegisResult<T> = Result<T, AegisError>;
