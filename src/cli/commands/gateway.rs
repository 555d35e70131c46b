//! `gateway` command: run the fail-safe forwarding gateway

use crate::adapters::{AnonymizationClient, BackendClient};
use crate::config::load_config_or_default;
use crate::gateway::FailSafeGateway;
use crate::server;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the gateway command
#[derive(Args, Debug)]
pub struct GatewayArgs {
    /// Listen address (overrides the config file)
    #[arg(long)]
    pub listen: Option<String>,
}

impl GatewayArgs {
    /// Execute the gateway command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };

        if let Some(listen) = &self.listen {
            config.gateway.listen_addr = listen.clone();
        }

        let anonymizer = AnonymizationClient::new(&config.gateway)?;
        let backend = BackendClient::new(&config.gateway)?;
        let gateway = FailSafeGateway::new(Arc::new(anonymizer), Arc::new(backend));

        tracing::info!(
            anonymizer_url = %config.gateway.anonymizer_url,
            backend_url = %config.gateway.backend_url,
            anonymize_timeout_seconds = config.gateway.anonymize_timeout_seconds,
            "Gateway ready"
        );

        server::serve(
            &config.gateway.listen_addr,
            server::gateway::router(gateway),
            "gateway",
            shutdown_signal,
        )
        .await?;

        Ok(0)
    }
}
