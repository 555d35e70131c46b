//! `anonymizer` command: run the detection service

use super::build_engine;
use crate::config::load_config_or_default;
use crate::server;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the anonymizer command
#[derive(Args, Debug)]
pub struct AnonymizerArgs {
    /// Listen address (overrides the config file)
    #[arg(long)]
    pub listen: Option<String>,

    /// Patterns file (overrides the config file)
    #[arg(long)]
    pub patterns: Option<PathBuf>,
}

impl AnonymizerArgs {
    /// Execute the anonymizer command
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
            config.anonymizer.listen_addr = listen.clone();
        }
        if let Some(patterns) = &self.patterns {
            config.anonymizer.patterns_file = patterns.clone();
        }

        let engine = build_engine(&config.anonymizer);
        tracing::info!(
            patterns_file = %config.anonymizer.patterns_file.display(),
            detectors = ?engine.registry().detector_names(),
            "Detection service ready"
        );

        let router = server::detection::router(engine);
        server::serve(
            &config.anonymizer.listen_addr,
            router,
            "anonymizer",
            shutdown_signal,
        )
        .await?;

        Ok(0)
    }
}
