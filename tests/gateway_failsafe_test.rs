//! Integration tests for the fail-safe gateway
//!
//! The detection service and the LLM backend are played by mockito servers;
//! the gateway router is driven in-process with `oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use mockito::{Matcher, Server, ServerGuard};
use scrubgate::adapters::{AnonymizationClient, BackendClient};
use scrubgate::gateway::FailSafeGateway;
use scrubgate::server::gateway::{router, BLOCKED_MESSAGE};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

const CHAT_BODY: &str = r#"{"model":"gpt-4","messages":[{"role":"user","content":"My email is test@example.com"}],"temperature":0.7,"stream":false}"#;

fn gateway_for(anonymizer_url: &str, backend_url: &str, call_timeout: Duration) -> FailSafeGateway {
    let anonymizer =
        AnonymizationClient::with_timeouts(anonymizer_url, call_timeout, Duration::from_millis(500))
            .unwrap();
    let backend = BackendClient::with_timeout(backend_url, Duration::from_secs(5), None).unwrap();
    FailSafeGateway::new(Arc::new(anonymizer), Arc::new(backend))
}

/// A listener that accepts connections and never answers
async fn black_hole() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

async fn post_chat(gateway: FailSafeGateway, body: &str) -> (StatusCode, Vec<u8>) {
    let response = router(gateway)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn backend_expecting(calls: usize) -> (ServerGuard, mockito::Mock) {
    let mut backend = Server::new_async().await;
    let mock = backend
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"content": "Hello!"}}]}"#)
        .expect(calls)
        .create_async()
        .await;
    (backend, mock)
}

#[tokio::test]
async fn test_anonymizer_timeout_blocks_request() {
    let anonymizer_url = black_hole().await;
    let (backend, backend_mock) = backend_expecting(0).await;

    let gateway = gateway_for(&anonymizer_url, &backend.url(), Duration::from_millis(300));
    let (status, body) = post_chat(gateway, CHAT_BODY).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], BLOCKED_MESSAGE);
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_anonymizer_error_status_blocks_request() {
    let mut anonymizer = Server::new_async().await;
    let _anon = anonymizer
        .mock("POST", "/anonymize")
        .with_status(500)
        .with_body(r#"{"error": "Scrubbing failed"}"#)
        .create_async()
        .await;
    let (backend, backend_mock) = backend_expecting(0).await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let (status, body) = post_chat(gateway, CHAT_BODY).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("Scrubbing failed"));
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_anonymizer_unreachable_blocks_request() {
    let (backend, backend_mock) = backend_expecting(0).await;

    let gateway = gateway_for("http://127.0.0.1:9", &backend.url(), Duration::from_secs(2));
    let (status, body) = post_chat(gateway, CHAT_BODY).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    // No topology in the response
    assert!(!String::from_utf8(body).unwrap().contains("127.0.0.1"));
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_sanitized_request_forwarded_once() {
    let mut anonymizer = Server::new_async().await;
    let _anon = anonymizer
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "My email is test@example.com"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"anonymized": "My email is {{EMAIL}}", "pii_count": 1, "secrets_count": 0}"#)
        .create_async()
        .await;

    let mut backend = Server::new_async().await;
    let backend_mock = backend
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": "My email is {{EMAIL}}"}],
            "temperature": 0.7,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"message": {"content": "Hello!"}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let (status, body) = post_chat(gateway, CHAT_BODY).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"choices": [{"message": {"content": "Hello!"}}]}"#);
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_second_message_failure_blocks_whole_request() {
    let mut anonymizer = Server::new_async().await;
    let _first = anonymizer
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "first"})))
        .with_status(200)
        .with_body(r#"{"anonymized": "first"}"#)
        .create_async()
        .await;
    let _second = anonymizer
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "second"})))
        .with_status(503)
        .create_async()
        .await;
    let third = anonymizer
        .mock("POST", "/anonymize")
        .match_body(Matcher::Json(json!({"text": "third"})))
        .with_status(200)
        .with_body(r#"{"anonymized": "third"}"#)
        .expect(0)
        .create_async()
        .await;
    let (backend, backend_mock) = backend_expecting(0).await;

    let body = json!({
        "model": "gpt-4",
        "messages": [
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "second"},
            {"role": "user", "content": "third"}
        ]
    })
    .to_string();

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let (status, _) = post_chat(gateway, &body).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    third.assert_async().await;
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_status_relayed_verbatim() {
    let mut anonymizer = Server::new_async().await;
    let _anon = anonymizer
        .mock("POST", "/anonymize")
        .with_status(200)
        .with_body(r#"{"anonymized": "hello"}"#)
        .create_async()
        .await;

    let mut backend = Server::new_async().await;
    let _backend = backend
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_header("content-type", "text/plain")
        .with_body("slow down")
        .create_async()
        .await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let response = router(gateway)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/chat/completions")
                .body(Body::from(
                    r#"{"messages":[{"role":"user","content":"hello"}]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["content-type"], "text/plain");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"slow down");
}

#[tokio::test]
async fn test_invalid_body_rejected_without_calls() {
    let mut anonymizer = Server::new_async().await;
    let anon = anonymizer
        .mock("POST", "/anonymize")
        .expect(0)
        .create_async()
        .await;
    let (backend, backend_mock) = backend_expecting(0).await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let (status, body) = post_chat(gateway, "not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "invalid_request");
    anon.assert_async().await;
    backend_mock.assert_async().await;
}

#[tokio::test]
async fn test_backend_unreachable_is_bad_gateway() {
    let mut anonymizer = Server::new_async().await;
    let _anon = anonymizer
        .mock("POST", "/anonymize")
        .with_status(200)
        .with_body(r#"{"anonymized": "hello"}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&anonymizer.url(), "http://127.0.0.1:9", Duration::from_secs(2));
    let (status, body) = post_chat(gateway, r#"{"messages":[{"role":"user","content":"hello"}]}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Backend request failed");
}

#[tokio::test]
async fn test_models_passthrough_skips_anonymizer() {
    let mut anonymizer = Server::new_async().await;
    let anon = anonymizer
        .mock("POST", "/anonymize")
        .expect(0)
        .create_async()
        .await;

    let mut backend = Server::new_async().await;
    let models = backend
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":[{"id":"gpt-4"}]}"#)
        .create_async()
        .await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let response = router(gateway)
        .oneshot(Request::builder().uri("/v1/models").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    models.assert_async().await;
    anon.assert_async().await;
}

#[tokio::test]
async fn test_health_degraded_but_ok_status() {
    let (backend, _) = backend_expecting(0).await;
    let gateway = gateway_for("http://127.0.0.1:9", &backend.url(), Duration::from_secs(2));

    let response = router(gateway)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "degraded", "service": "gateway", "anonymizer": "unreachable"}));
}

#[tokio::test]
async fn test_large_integers_reach_backend_unchanged() {
    let body = r#"{"model":"m","seed":123456789012345678901234,"messages":[{"role":"user","content":"hi"}],"temperature":0.70}"#;

    let mut anonymizer = Server::new_async().await;
    let _anon = anonymizer
        .mock("POST", "/anonymize")
        .with_status(200)
        .with_body(r#"{"anonymized": "hi"}"#)
        .create_async()
        .await;

    let mut backend = Server::new_async().await;
    let backend_mock = backend
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Exact(body.to_string()))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let gateway = gateway_for(&anonymizer.url(), &backend.url(), Duration::from_secs(2));
    let (status, _) = post_chat(gateway, body).await;

    assert_eq!(status, StatusCode::OK);
    backend_mock.assert_async().await;
}
