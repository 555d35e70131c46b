//! Configuration management for Scrubgate.
//!
//! Scrubgate uses a single TOML file shared by the detection service and the
//! gateway, with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SCRUBGATE_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymizer]
//! listen_addr = "0.0.0.0:5001"
//! patterns_file = "patterns.json"
//!
//! [gateway]
//! listen_addr = "0.0.0.0:4000"
//! anonymizer_url = "http://anonymizer:5001"
//! backend_url = "http://litellm:4000"
//! anonymize_timeout_seconds = 10
//! backend_api_key = "${LITELLM_MASTER_KEY}"
//! ```
//!
//! The custom detector patterns are NOT part of this file: they live in the
//! separate patterns file so they can be hot-reloaded.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AnonymizerConfig, ApplicationConfig, GatewayConfig, LoggingConfig, ScrubgateConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
