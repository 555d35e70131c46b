//! HTTP client for the LLM backend

use super::traits::{ChatBackend, RelayedResponse};
use crate::config::{GatewayConfig, SecretString};
use crate::domain::{BackendError, Result, ScrubError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Backend client
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl BackendClient {
    /// Create a client from gateway configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Self::with_timeout(
            &config.backend_url,
            config.backend_timeout(),
            config.backend_api_key.clone(),
        )
    }

    /// Create a client with an explicit timeout and optional bearer key
    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
        api_key: Option<SecretString>,
    ) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrubError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) if !key.expose_secret().is_empty() => {
                request.bearer_auth(key.expose_secret().as_str())
            }
            _ => request,
        }
    }

    async fn relay(request: RequestBuilder) -> std::result::Result<RelayedResponse, BackendError> {
        let resp = request
            .send()
            .await
            .map_err(|e| BackendError::from_transport(&e))?;

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendError::from_transport(&e))?;

        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn chat_completions(
        &self,
        body: &Value,
    ) -> std::result::Result<RelayedResponse, BackendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = self.authorize(self.client.post(&url).json(body));
        Self::relay(request).await
    }

    async fn list_models(&self) -> std::result::Result<RelayedResponse, BackendError> {
        let url = format!("{}/v1/models", self.base_url);
        let request = self.authorize(self.client.get(&url));
        Self::relay(request).await
    }
}
