//! Gateway HTTP surface

use crate::adapters::RelayedResponse;
use crate::gateway::{FailSafeGateway, GatewayHealth, GatewayOutcome};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

/// Error body returned for blocked requests
pub const BLOCKED_MESSAGE: &str = "Anonymization failed - request blocked for security";

/// Build the gateway router
pub fn router(gateway: FailSafeGateway) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat_completions))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Turn a backend response into an HTTP response without touching it
pub fn relay(response: RelayedResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut relayed = (status, response.body).into_response();

    match response
        .content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
    {
        Some(content_type) => {
            relayed.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        None => {
            relayed.headers_mut().remove(header::CONTENT_TYPE);
        }
    }

    relayed
}

fn backend_failed() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": "Backend request failed"})),
    )
        .into_response()
}

/// Map a gateway outcome to its HTTP response
pub fn outcome_response(outcome: GatewayOutcome) -> Response {
    match outcome {
        GatewayOutcome::Rejected(reason) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_request", "message": reason})),
        )
            .into_response(),
        // Transport detail stays in the logs
        GatewayOutcome::Blocked(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": BLOCKED_MESSAGE})),
        )
            .into_response(),
        GatewayOutcome::Forwarded(response) => relay(response),
        GatewayOutcome::BackendFailed(_) => backend_failed(),
    }
}

async fn health(State(gateway): State<FailSafeGateway>) -> Json<GatewayHealth> {
    Json(gateway.health().await)
}

async fn list_models(State(gateway): State<FailSafeGateway>) -> Response {
    match gateway.list_models().await {
        Ok(response) => relay(response),
        Err(e) => {
            tracing::error!(error = %e, "Model listing failed");
            backend_failed()
        }
    }
}

async fn chat_completions(State(gateway): State<FailSafeGateway>, body: Bytes) -> Response {
    outcome_response(gateway.handle_chat(&body).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnonymizationError, BackendError};

    #[test]
    fn test_blocked_hides_transport_detail() {
        let response = outcome_response(GatewayOutcome::Blocked(AnonymizationError::Transport(
            "connection refused to 10.0.0.7:5001".to_string(),
        )));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_backend_failure_is_bad_gateway() {
        let response = outcome_response(GatewayOutcome::BackendFailed(BackendError::Timeout(
            "60s".to_string(),
        )));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_relay_keeps_status_and_content_type() {
        let response = relay(RelayedResponse {
            status: 418,
            content_type: Some("text/event-stream".to_string()),
            body: Bytes::from_static(b"data: hi\n\n"),
        });
        assert_eq!(response.status().as_u16(), 418);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
    }

    #[test]
    fn test_relay_without_content_type() {
        let response = relay(RelayedResponse {
            status: 204,
            content_type: None,
            body: Bytes::new(),
        });
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
