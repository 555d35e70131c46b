//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Plain or JSON-formatted console logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! Sensitive values are never logged. Detected spans are identified by a
//! SHA-256 fingerprint (see [`fingerprint`]).

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a sensitive value, safe to log
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Log a gateway request that was blocked because redaction did not complete
#[macro_export]
macro_rules! log_request_blocked {
    ($request_id:expr, $error:expr) => {
        tracing::error!(
            request_id = %$request_id,
            error = %$error,
            "Request blocked: anonymization failed"
        )
    };
}

/// Log a detector that could not be registered
#[macro_export]
macro_rules! log_detector_skipped {
    ($name:expr, $reason:expr) => {
        tracing::error!(
            detector = %$name,
            reason = %$reason,
            "Skipping detector"
        )
    };
}
