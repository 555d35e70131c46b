//! Validate config command implementation
//!
//! This module implements the `validate-config` command: it checks the
//! configuration file and compiles the patterns file without starting a
//! server.

use crate::config::{load_config, ScrubgateConfig};
use crate::scrubber::detector::patterns::PatternDefinitions;
use crate::scrubber::DetectorSet;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Treat skipped pattern entries as a failure
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(c) => {
                    println!("✅ Configuration file loaded successfully");
                    c
                }
                Err(e) => {
                    println!("❌ Failed to load configuration file");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            }
        } else {
            println!("ℹ️  Configuration file not found, checking defaults");
            ScrubgateConfig::default()
        };

        print_summary(&config);

        let patterns_file = &config.anonymizer.patterns_file;
        let definitions = match PatternDefinitions::load(patterns_file) {
            Ok(Some(definitions)) => definitions,
            Ok(None) => {
                println!();
                println!(
                    "ℹ️  Patterns file {} not found, built-in detectors only",
                    patterns_file.display()
                );
                return Ok(0);
            }
            Err(e) => {
                println!();
                println!("❌ Patterns file is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let (_, report) = DetectorSet::builder()
            .with_builtins(config.anonymizer.enable_name_detector)
            .overlay_definitions(&definitions)
            .build_with_report();

        println!();
        println!("Patterns: {}", patterns_file.display());
        println!("  Custom detectors loaded: {}", report.loaded);
        for skipped in &report.skipped {
            println!("  ⚠️  Skipped '{}': {}", skipped.name, skipped.reason);
        }
        println!("  Active detectors: {}", report.detectors.join(", "));

        if self.strict && !report.skipped.is_empty() {
            println!();
            println!("❌ {} pattern(s) skipped (strict mode)", report.skipped.len());
            return Ok(2);
        }

        Ok(0)
    }
}

fn print_summary(config: &ScrubgateConfig) {
    println!("✅ Configuration is valid");
    println!();
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Anonymizer Listen: {}", config.anonymizer.listen_addr);
    println!(
        "  Name Detector: {}",
        if config.anonymizer.enable_name_detector { "enabled" } else { "disabled" }
    );
    println!("  Gateway Listen: {}", config.gateway.listen_addr);
    println!("  Anonymizer URL: {}", config.gateway.anonymizer_url);
    println!("  Backend URL: {}", config.gateway.backend_url);
    println!(
        "  Anonymize Timeout: {}s",
        config.gateway.anonymize_timeout_seconds
    );
    println!(
        "  Backend API Key: {}",
        if config.gateway.backend_api_key.is_some() { "configured" } else { "not set" }
    );
}
