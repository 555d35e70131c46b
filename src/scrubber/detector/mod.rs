//! Detector contract and implementations
//!
//! Every detector, pattern-based or not, exposes the same capability:
//! scan a text and return raw spans. Overlap resolution happens later in
//! the engine, so a detector never needs to know about the others.

pub mod name;
pub mod patterns;
pub mod regex;

pub use name::NameDetector;
pub use regex::RegexDetector;

use crate::domain::Result;
use crate::scrubber::models::RawSpan;
use serde::{Deserialize, Serialize};

/// Origin of a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// Shipped with the engine
    BuiltIn,
    /// Loaded from the patterns file
    Custom,
}

/// Trait for sensitive-text detectors
pub trait Detector: Send + Sync {
    /// Unique key within a detector set
    fn name(&self) -> &str;

    /// Filth type reported in detections and rendered in placeholders
    fn filth_type(&self) -> &str {
        self.name()
    }

    /// Built-in or custom
    fn kind(&self) -> DetectorKind;

    /// Locate sensitive spans in `text`
    ///
    /// Returned offsets are byte offsets on character boundaries.
    fn scan(&self, text: &str) -> Result<Vec<RawSpan>>;
}

impl std::fmt::Debug for dyn Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("name", &self.name())
            .field("filth_type", &self.filth_type())
            .field("kind", &self.kind())
            .finish()
    }
}
