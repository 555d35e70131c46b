//! Configuration schema types
//!
//! This module defines the configuration structure for both Scrubgate services.

use crate::config::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main Scrubgate configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrubgateConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Detection service settings
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,

    /// Forwarding gateway settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScrubgateConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymizer.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Detection service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnonymizerConfig {
    /// Socket address the detection service listens on
    #[serde(default = "default_anonymizer_listen_addr")]
    pub listen_addr: String,

    /// Path to the custom pattern definitions (JSON object or TOML table of strings)
    #[serde(default = "default_patterns_file")]
    pub patterns_file: PathBuf,

    /// Register the built-in person-name detector
    #[serde(default = "default_true")]
    pub enable_name_detector: bool,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_anonymizer_listen_addr(),
            patterns_file: default_patterns_file(),
            enable_name_detector: true,
        }
    }
}

impl AnonymizerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_listen_addr("anonymizer.listen_addr", &self.listen_addr)?;

        if self.patterns_file.as_os_str().is_empty() {
            return Err("anonymizer.patterns_file cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Forwarding gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Socket address the gateway listens on
    #[serde(default = "default_gateway_listen_addr")]
    pub listen_addr: String,

    /// Base URL of the detection service
    #[serde(default = "default_anonymizer_url")]
    pub anonymizer_url: String,

    /// Base URL of the OpenAI-compatible LLM backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Per-call budget for one anonymization request
    #[serde(default = "default_anonymize_timeout_seconds")]
    pub anonymize_timeout_seconds: u64,

    /// Budget for the detection service health probe
    #[serde(default = "default_health_timeout_seconds")]
    pub health_timeout_seconds: u64,

    /// Budget for one backend call
    #[serde(default = "default_backend_timeout_seconds")]
    pub backend_timeout_seconds: u64,

    /// Bearer credential attached to backend calls (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub backend_api_key: Option<SecretString>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_gateway_listen_addr(),
            anonymizer_url: default_anonymizer_url(),
            backend_url: default_backend_url(),
            anonymize_timeout_seconds: default_anonymize_timeout_seconds(),
            health_timeout_seconds: default_health_timeout_seconds(),
            backend_timeout_seconds: default_backend_timeout_seconds(),
            backend_api_key: None,
        }
    }
}

impl GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        validate_listen_addr("gateway.listen_addr", &self.listen_addr)?;
        validate_http_url("gateway.anonymizer_url", &self.anonymizer_url)?;
        validate_http_url("gateway.backend_url", &self.backend_url)?;

        if self.anonymize_timeout_seconds == 0 {
            return Err("gateway.anonymize_timeout_seconds must be > 0".to_string());
        }
        if self.health_timeout_seconds == 0 {
            return Err("gateway.health_timeout_seconds must be > 0".to_string());
        }
        if self.backend_timeout_seconds == 0 {
            return Err("gateway.backend_timeout_seconds must be > 0".to_string());
        }

        if let Some(ref key) = self.backend_api_key {
            use secrecy::ExposeSecret;
            if key.expose_secret().is_empty() {
                return Err("gateway.backend_api_key cannot be empty when set".to_string());
            }
        }

        Ok(())
    }

    /// Anonymization call budget
    pub fn anonymize_timeout(&self) -> Duration {
        Duration::from_secs(self.anonymize_timeout_seconds)
    }

    /// Health probe budget
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_seconds)
    }

    /// Backend call budget
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

fn validate_listen_addr(field: &str, value: &str) -> Result<(), String> {
    value
        .parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|e| format!("Invalid {field} '{value}': {e}"))
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("Invalid {field} '{value}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "Invalid {field} '{value}': scheme must be http or https, got {other}"
        )),
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_anonymizer_listen_addr() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_patterns_file() -> PathBuf {
    PathBuf::from("patterns.json")
}

fn default_gateway_listen_addr() -> String {
    "0.0.0.0:4000".to_string()
}

fn default_anonymizer_url() -> String {
    "http://anonymizer:5001".to_string()
}

fn default_backend_url() -> String {
    "http://litellm:4000".to_string()
}

fn default_anonymize_timeout_seconds() -> u64 {
    10
}

fn default_health_timeout_seconds() -> u64 {
    5
}

fn default_backend_timeout_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
