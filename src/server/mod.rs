//! HTTP surfaces
//!
//! - [`detection`] - the detection service (`/anonymize`, `/detect`, `/health`, `/management/reload`)
//! - [`gateway`] - the fail-safe gateway (`/v1/chat/completions`, `/v1/models`, `/health`)

pub mod detection;
pub mod gateway;

use crate::domain::{Result, ScrubError};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Serve `router` on `addr` until the shutdown signal flips to `true`
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
pub async fn serve(
    addr: &str,
    router: Router,
    service: &'static str,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ScrubError::Io(format!("Failed to bind {addr}: {e}")))?;

    serve_on(listener, router, service, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve_on(
    listener: TcpListener,
    router: Router,
    service: &'static str,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let local_addr = listener.local_addr()?;
    tracing::info!(service, addr = %local_addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if shutdown.wait_for(|stop| *stop).await.is_err() {
                // Sender gone: no signal will ever arrive
                std::future::pending::<()>().await;
            }
            tracing::info!(service, "Shutting down");
        })
        .await?;

    Ok(())
}
