//! Built-in pattern library and custom pattern definitions
//!
//! Custom definitions are a flat mapping from detector name to pattern
//! string, read from a JSON object (`patterns.json`) or a TOML file.

use super::{Detector, NameDetector, RegexDetector};
use crate::domain::{Result, ScrubError};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Built-in detectors as `(name, pattern)` pairs; the name is also the filth type
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("credential", r"(?i)\b(?:password|passwd|pwd|pw)\s*[:=]\s*\S+"),
    (
        "credit_card",
        r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6011)[ -]?\d{4}[ -]?\d{4}[ -]?\d{1,4}\b",
    ),
    ("email", r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b"),
    (
        "phone",
        r"(?:\+\d{1,3}[\s.\-]?)?(?:\(\d{3}\)|\b\d{3})[\s.\-]?\d{3}[\s.\-]?\d{4}\b",
    ),
    ("social_security_number", r"\b\d{3}-\d{2}-\d{4}\b"),
    ("twitter", r"\B@[A-Za-z0-9_]{1,15}\b"),
    ("url", r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#),
];

/// Instantiate the built-in detectors
///
/// A built-in that fails to compile is logged and left out; it never
/// prevents the others from loading.
pub fn builtin_detectors(enable_name_detector: bool) -> Vec<Arc<dyn Detector>> {
    let mut detectors: Vec<Arc<dyn Detector>> = Vec::with_capacity(BUILTIN_PATTERNS.len() + 1);

    for (name, pattern) in BUILTIN_PATTERNS {
        match RegexDetector::builtin(*name, pattern) {
            Ok(detector) => detectors.push(Arc::new(detector)),
            Err(e) => crate::log_detector_skipped!(name, e),
        }
    }

    if enable_name_detector {
        match NameDetector::new() {
            Ok(detector) => detectors.push(Arc::new(detector)),
            Err(e) => tracing::warn!(error = %e, "Could not add name detector"),
        }
    }

    detectors
}

/// A configured entry that could not be turned into a detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPattern {
    /// Detector name from the configuration
    pub name: String,
    /// Human-readable reason
    pub reason: String,
}

/// Parsed custom pattern definitions
#[derive(Debug, Clone, Default)]
pub struct PatternDefinitions {
    /// `(name, pattern)` pairs in file order
    pub entries: Vec<(String, String)>,
    /// Entries rejected while parsing (non-string values)
    pub skipped: Vec<SkippedPattern>,
}

impl PatternDefinitions {
    /// Configured detector names, including the ones that will fail to compile
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Load definitions from a file, choosing the format by extension
    ///
    /// Returns `Ok(None)` when the file does not exist: only built-ins are
    /// active in that case.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, cannot be
    /// parsed, or its root is not a mapping.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrubError::Configuration(format!(
                "Failed to read patterns file {}: {}",
                path.display(),
                e
            ))
        })?;

        let definitions = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            _ => Self::from_json(&content)?,
        };

        Ok(Some(definitions))
    }

    /// Parse a JSON object of `name -> pattern`
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            ScrubError::Configuration(format!("Failed to parse patterns JSON: {e}"))
        })?;

        let serde_json::Value::Object(map) = value else {
            return Err(ScrubError::Configuration(
                "patterns file is not a mapping of name to pattern".to_string(),
            ));
        };

        let mut definitions = Self::default();
        for (name, value) in map {
            match value {
                serde_json::Value::String(pattern) => definitions.entries.push((name, pattern)),
                other => definitions.skipped.push(SkippedPattern {
                    name,
                    reason: format!("pattern must be a string, got {other}"),
                }),
            }
        }

        Ok(definitions)
    }

    /// Parse a TOML table of `name = "pattern"`
    ///
    /// Entries may sit at the root or inside a `[patterns]` table.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut root: toml::Table = toml::from_str(content).map_err(|e| {
            ScrubError::Configuration(format!("Failed to parse patterns TOML: {e}"))
        })?;

        let table = match root.remove("patterns") {
            Some(toml::Value::Table(table)) => table,
            Some(_) => {
                return Err(ScrubError::Configuration(
                    "[patterns] must be a table of name to pattern".to_string(),
                ))
            }
            None => root,
        };

        let mut definitions = Self::default();
        for (name, value) in table {
            match value {
                toml::Value::String(pattern) => definitions.entries.push((name, pattern)),
                other => definitions.skipped.push(SkippedPattern {
                    name,
                    reason: format!("pattern must be a string, got {}", other.type_str()),
                }),
            }
        }

        Ok(definitions)
    }
}
