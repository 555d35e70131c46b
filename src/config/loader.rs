//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ScrubgateConfig;
use crate::config::secret_string;
use crate::domain::errors::ScrubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ScrubgateConfig
/// 4. Applies environment variable overrides (SCRUBGATE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use scrubgate::config::loader::load_config;
///
/// let config = load_config("scrubgate.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrubgateConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ScrubgateConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads the configuration file when present, otherwise defaults plus overrides
///
/// Services started without a configuration file fall back to defaults so a
/// container can be driven purely through `SCRUBGATE_*` variables.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ScrubgateConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::warn!(
        config_path = %path.display(),
        "Configuration file not found, using defaults and environment overrides"
    );

    let mut config = ScrubgateConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

fn env_var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_regex();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments are copied verbatim
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ScrubError::Configuration(format!("Invalid {name} value: {value}")))
}

/// Applies environment variable overrides using SCRUBGATE_* prefix
///
/// Environment variables follow the pattern: SCRUBGATE_<SECTION>_<KEY>
/// For example: SCRUBGATE_GATEWAY_BACKEND_URL, SCRUBGATE_ANONYMIZER_PATTERNS_FILE
fn apply_env_overrides(config: &mut ScrubgateConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SCRUBGATE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Detection service overrides
    if let Ok(val) = std::env::var("SCRUBGATE_ANONYMIZER_LISTEN_ADDR") {
        config.anonymizer.listen_addr = val;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_ANONYMIZER_PATTERNS_FILE") {
        config.anonymizer.patterns_file = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("SCRUBGATE_ANONYMIZER_ENABLE_NAME_DETECTOR") {
        config.anonymizer.enable_name_detector =
            parse_env("SCRUBGATE_ANONYMIZER_ENABLE_NAME_DETECTOR", &val)?;
    }

    // Gateway overrides
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_LISTEN_ADDR") {
        config.gateway.listen_addr = val;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_ANONYMIZER_URL") {
        config.gateway.anonymizer_url = val;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_BACKEND_URL") {
        config.gateway.backend_url = val;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_ANONYMIZE_TIMEOUT_SECONDS") {
        config.gateway.anonymize_timeout_seconds =
            parse_env("SCRUBGATE_GATEWAY_ANONYMIZE_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_HEALTH_TIMEOUT_SECONDS") {
        config.gateway.health_timeout_seconds =
            parse_env("SCRUBGATE_GATEWAY_HEALTH_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_BACKEND_TIMEOUT_SECONDS") {
        config.gateway.backend_timeout_seconds =
            parse_env("SCRUBGATE_GATEWAY_BACKEND_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_GATEWAY_BACKEND_API_KEY") {
        config.gateway.backend_api_key = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SCRUBGATE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SCRUBGATE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SCRUBGATE_LOGGING_JSON") {
        config.logging.json = val.parse().unwrap_or(false);
    }

    Ok(())
}
