//! CLI command implementations
//!
//! Exit codes: `0` success, `2` configuration error, `3` redaction failure.
//! Errors returned from a command exit with `5`.

pub mod anonymizer;
pub mod gateway;
pub mod redact;
pub mod validate;

use crate::config::AnonymizerConfig;
use crate::scrubber::{DetectorRegistry, RegistrySource, ScrubbingEngine};
use std::sync::Arc;

/// Build a scrubbing engine from the anonymizer section
pub(crate) fn build_engine(config: &AnonymizerConfig) -> ScrubbingEngine {
    let (registry, _report) = DetectorRegistry::load(RegistrySource {
        patterns_file: config.patterns_file.clone(),
        enable_name_detector: config.enable_name_detector,
    });
    ScrubbingEngine::new(Arc::new(registry))
}
