//! Seams between the gateway and its network collaborators
//!
//! The gateway only talks to these traits, so tests can substitute
//! in-process doubles for the detection service and the LLM backend.

use crate::domain::{AnonymizationError, BackendError};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

/// Backend response relayed to the caller without reinterpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedResponse {
    /// HTTP status code
    pub status: u16,

    /// `Content-Type` header, if the backend sent one
    pub content_type: Option<String>,

    /// Raw body bytes
    pub body: Bytes,
}

impl RelayedResponse {
    /// Build a JSON response (used by test doubles)
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(body.to_string()),
        }
    }
}

/// Client side of the detection service
#[async_trait]
pub trait Anonymizer: Send + Sync {
    /// Redact `text`
    ///
    /// # Errors
    ///
    /// Any error means redaction did not happen. Implementations must never
    /// return the original text in place of an error.
    async fn anonymize(&self, text: &str) -> Result<String, AnonymizationError>;

    /// Whether the detection service is reachable
    async fn health(&self) -> bool;
}

/// The downstream LLM backend
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Forward a sanitized chat completion request
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached. Non-success
    /// statuses are not errors; they are relayed as-is.
    async fn chat_completions(&self, body: &Value) -> Result<RelayedResponse, BackendError>;

    /// Proxy the model listing
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    async fn list_models(&self) -> Result<RelayedResponse, BackendError>;
}
