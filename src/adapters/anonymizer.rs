//! HTTP client for the detection service

use super::traits::Anonymizer;
use crate::config::GatewayConfig;
use crate::domain::{AnonymizationError, Result, ScrubError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{json, Value};
use std::time::Duration;

/// Anonymization client backed by the detection service's `POST /anonymize`
#[derive(Debug, Clone)]
pub struct AnonymizationClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl AnonymizationClient {
    /// Create a client from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Self::with_timeouts(
            &config.anonymizer_url,
            config.anonymize_timeout(),
            config.health_timeout(),
        )
    }

    /// Create a client with explicit timeouts
    ///
    /// `call_timeout` bounds each `anonymize` call end to end; exceeding it
    /// is an [`AnonymizationError::Timeout`].
    pub fn with_timeouts(
        base_url: &str,
        call_timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(call_timeout)
            .build()
            .map_err(|e| ScrubError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout,
        })
    }

    /// Base URL of the detection service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Anonymizer for AnonymizationClient {
    async fn anonymize(&self, text: &str) -> std::result::Result<String, AnonymizationError> {
        let url = format!("{}/anonymize", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| AnonymizationError::from_transport(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnonymizationError::Status(status.as_u16()));
        }

        let body: Value = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                AnonymizationError::Timeout(e.to_string())
            } else {
                AnonymizationError::InvalidResponse(e.to_string())
            }
        })?;

        let anonymized = body
            .get("anonymized")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AnonymizationError::InvalidResponse("missing 'anonymized' field".to_string())
            })?;

        tracing::info!(
            anonymized_length = anonymized.chars().count(),
            pii_count = body.get("pii_count").and_then(serde_json::Value::as_u64).unwrap_or(0),
            secrets_count = body
                .get("secrets_count")
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(0),
            "Text anonymized"
        );

        Ok(anonymized.to_string())
    }

    async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Anonymizer health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: &str) -> AnonymizationClient {
        AnonymizationClient::with_timeouts(url, Duration::from_secs(2), Duration::from_secs(1))
            .unwrap()
    }

    #[tokio::test]
    async fn test_anonymize_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/anonymize")
            .match_body(mockito::Matcher::Json(json!({"text": "mail john@example.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"anonymized": "mail {{EMAIL}}", "pii_count": 1, "secrets_count": 0}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.anonymize("mail john@example.com").await.unwrap();

        assert_eq!(result, "mail {{EMAIL}}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/anonymize")
            .with_status(500)
            .with_body(r#"{"error": "boom"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.anonymize("secret").await.unwrap_err();
        assert!(matches!(err, AnonymizationError::Status(500)));
    }

    #[tokio::test]
    async fn test_missing_field_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/anonymize")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text": "secret"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.anonymize("secret").await.unwrap_err();
        assert!(matches!(err, AnonymizationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        // Nothing listens on the discard port
        let client = client_for("http://127.0.0.1:9");
        let err = client.anonymize("secret").await.unwrap_err();
        assert!(matches!(
            err,
            AnonymizationError::Transport(_) | AnonymizationError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status": "healthy"}"#)
            .create_async()
            .await;

        assert!(client_for(&server.url()).health().await);
        assert!(!client_for("http://127.0.0.1:9").health().await);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client_for("http://anonymizer:5001/");
        assert_eq!(client.base_url(), "http://anonymizer:5001");
    }
}
