//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Scrubgate using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Scrubgate - PII redaction service and fail-safe LLM gateway
#[derive(Parser, Debug)]
#[command(name = "scrubgate")]
#[command(version, about, long_about = None)]
#[command(author = "Scrubgate Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "scrubgate.toml", env = "SCRUBGATE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SCRUBGATE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the detection service
    Anonymizer(commands::anonymizer::AnonymizerArgs),

    /// Run the fail-safe forwarding gateway
    Gateway(commands::gateway::GatewayArgs),

    /// Redact a file or stdin offline
    Redact(commands::redact::RedactArgs),

    /// Validate configuration and patterns files
    ValidateConfig(commands::validate::ValidateArgs),
}
