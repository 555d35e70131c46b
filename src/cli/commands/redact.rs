//! `redact` command: offline redaction of a file or stdin

use super::build_engine;
use crate::config::load_config_or_default;
use crate::scrubber::ScrubOutcome;
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Patterns file (overrides the config file)
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Print the full result as JSON instead of the redacted text
    #[arg(long)]
    pub json: bool,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };
        if let Some(patterns) = &self.patterns {
            config.anonymizer.patterns_file = patterns.clone();
        }

        let text = match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            }
        };

        let engine = build_engine(&config.anonymizer);
        let outcome = match engine.redact(&text) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Redaction failed");
                eprintln!("Error: {e}");
                return Ok(3);
            }
        };

        print!("{}", render(&outcome, self.json)?);
        Ok(0)
    }
}

fn render(outcome: &ScrubOutcome, json: bool) -> anyhow::Result<String> {
    if json {
        let mut rendered = serde_json::to_string_pretty(outcome)?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(outcome.anonymized.clone())
    }
}
