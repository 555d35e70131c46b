//! Fail-safe forwarding gateway
//!
//! Per chat request:
//!
//! 1. **Validate** the body, or reject it before any network call
//! 2. **Anonymize** each string message content, in order, stopping at the
//!    first failure
//! 3. **Forward** once, only if every message was anonymized
//! 4. **Relay** the backend response verbatim
//!
//! A failure in step 2 ends in [`GatewayOutcome::Blocked`] and the backend
//! is never called. There is no retry and no fallback to the original text.

use super::health::GatewayHealth;
use super::messages::{anonymize_messages, parse_chat_request};
use crate::adapters::{Anonymizer, ChatBackend, RelayedResponse};
use crate::domain::{AnonymizationError, BackendError};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Terminal state of one chat request
#[derive(Debug)]
pub enum GatewayOutcome {
    /// Malformed input, nothing was sent anywhere
    Rejected(String),
    /// Anonymization did not complete, the backend was not called
    Blocked(AnonymizationError),
    /// Sanitized request forwarded, backend response to relay
    Forwarded(RelayedResponse),
    /// Sanitized request could not be delivered to the backend
    BackendFailed(BackendError),
}

/// Gateway enforcing anonymization before forwarding
#[derive(Clone)]
pub struct FailSafeGateway {
    anonymizer: Arc<dyn Anonymizer>,
    backend: Arc<dyn ChatBackend>,
}

impl FailSafeGateway {
    /// Create a gateway from its two collaborators
    pub fn new(anonymizer: Arc<dyn Anonymizer>, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            anonymizer,
            backend,
        }
    }

    /// Process one chat completion request
    pub async fn handle_chat(&self, raw_body: &[u8]) -> GatewayOutcome {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat_completion", request_id = %request_id);
        self.process_chat(request_id, raw_body).instrument(span).await
    }

    async fn process_chat(&self, request_id: Uuid, raw_body: &[u8]) -> GatewayOutcome {
        let mut body = match parse_chat_request(raw_body) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected chat request");
                return GatewayOutcome::Rejected(e.to_string());
            }
        };

        let anonymized = match anonymize_messages(&mut body, self.anonymizer.as_ref()).await {
            Ok(count) => count,
            Err(e) => {
                crate::log_request_blocked!(request_id, e);
                return GatewayOutcome::Blocked(e);
            }
        };

        tracing::info!(messages_anonymized = anonymized, "Forwarding sanitized request");

        match self.backend.chat_completions(&Value::Object(body)).await {
            Ok(response) => {
                tracing::info!(status = response.status, "Backend responded");
                GatewayOutcome::Forwarded(response)
            }
            Err(e) => {
                tracing::error!(error = %e, "Backend request failed");
                GatewayOutcome::BackendFailed(e)
            }
        }
    }

    /// Proxy the model listing; carries no user content
    pub async fn list_models(&self) -> Result<RelayedResponse, BackendError> {
        self.backend.list_models().await
    }

    /// Probe the detection service
    pub async fn health(&self) -> GatewayHealth {
        GatewayHealth::from_probe(self.anonymizer.health().await)
    }
}
