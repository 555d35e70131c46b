//! Domain error types
//!
//! This module defines the error hierarchy for Scrubgate.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Scrubgate error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Configuration-related errors (unreadable or non-mapping pattern files, bad TOML)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A single detector pattern failed to compile
    #[error("Invalid pattern for detector '{name}': {reason}")]
    Pattern { name: String, reason: String },

    /// Engine-internal scan failure
    #[error("Detection failed in detector '{detector}': {message}")]
    Detection { detector: String, message: String },

    /// Gateway-side anonymization failures
    #[error("Anonymization error: {0}")]
    Anonymization(#[from] AnonymizationError),

    /// LLM backend errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Malformed inbound request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Anonymization Client errors
///
/// Every variant means redaction did not happen. None of them carries a
/// fallback value: the caller must block the request.
#[derive(Debug, Error)]
pub enum AnonymizationError {
    /// The detection service did not answer within the call budget
    #[error("Anonymizer request timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, reset, etc.
    #[error("Cannot reach anonymizer: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Anonymizer returned {0}")]
    Status(u16),

    /// 200 response without a usable `anonymized` field
    #[error("Invalid response from anonymizer: {0}")]
    InvalidResponse(String),
}

/// LLM backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request timed out
    #[error("Backend request timeout: {0}")]
    Timeout(String),

    /// Failed to connect or read the response
    #[error("Failed to reach backend: {0}")]
    ConnectionFailed(String),
}

impl AnonymizationError {
    /// Classify a reqwest transport error
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl BackendError {
    /// Classify a reqwest transport error
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ScrubError {
    fn from(err: serde_json::Error) -> Self {
        ScrubError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parse error: {err}"))
    }
}
