//! Detection service HTTP surface

use crate::domain::ScrubError;
use crate::scrubber::{Detection, ScrubbingEngine};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Name reported by the health endpoint
pub const ENGINE_NAME: &str = "scrubgate";

#[derive(Debug, Serialize)]
struct DetectResponse {
    detections: Vec<Detection>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    engine: &'static str,
    detectors_count: usize,
    detectors: Vec<String>,
}

/// Build the detection service router
pub fn router(engine: ScrubbingEngine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/anonymize", post(anonymize))
        .route("/detect", post(detect))
        .route("/management/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

fn missing_text() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Missing 'text' field"})),
    )
        .into_response()
}

fn scan_failed(error: &ScrubError) -> Response {
    tracing::error!(error = %error, "Scrubbing failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": error.to_string()})),
    )
        .into_response()
}

/// Pull the `text` string out of a request body
fn extract_text(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("text")?.as_str().map(str::to_string)
}

/// Run a CPU-bound engine call off the async executor
async fn run_engine<T, F>(engine: ScrubbingEngine, op: F) -> Result<T, ScrubError>
where
    T: Send + 'static,
    F: FnOnce(&ScrubbingEngine) -> Result<T, ScrubError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&engine))
        .await
        .map_err(|e| ScrubError::Detection {
            detector: "engine".to_string(),
            message: e.to_string(),
        })?
}

async fn health(State(engine): State<ScrubbingEngine>) -> Json<HealthResponse> {
    let detectors = engine.registry().detector_names();
    Json(HealthResponse {
        status: "healthy",
        engine: ENGINE_NAME,
        detectors_count: detectors.len(),
        detectors,
    })
}

async fn anonymize(State(engine): State<ScrubbingEngine>, body: Bytes) -> Response {
    let Some(text) = extract_text(&body) else {
        return missing_text();
    };

    match run_engine(engine, move |e| e.redact(&text)).await {
        Ok(outcome) => {
            tracing::info!(
                detections = outcome.detections_count,
                pii_count = outcome.pii_count,
                secrets_count = outcome.secrets_count,
                "Text anonymized"
            );
            Json(outcome).into_response()
        }
        Err(e) => scan_failed(&e),
    }
}

async fn detect(State(engine): State<ScrubbingEngine>, body: Bytes) -> Response {
    let Some(text) = extract_text(&body) else {
        return missing_text();
    };

    match run_engine(engine, move |e| e.scan(&text)).await {
        Ok(detections) => Json(DetectResponse {
            count: detections.len(),
            detections,
        })
        .into_response(),
        Err(e) => scan_failed(&e),
    }
}

async fn reload(State(engine): State<ScrubbingEngine>) -> Response {
    let registry = engine.registry().clone();
    let result = tokio::task::spawn_blocking(move || registry.reload()).await;

    match result {
        Ok(Ok(report)) => Json(json!({
            "status": "success",
            "message": format!(
                "Detector set reloaded: {} custom detectors loaded, {} skipped",
                report.loaded,
                report.skipped.len()
            ),
            "detectors": report.detectors,
            "skipped": report.skipped,
            "loaded_at": report.loaded_at,
        }))
        .into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Reload failed, keeping previous detector set");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "message": e.to_string()})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": e.to_string()})),
        )
            .into_response(),
    }
}
