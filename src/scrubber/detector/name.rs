//! Person-name detector
//!
//! Occupies the slot of the statistical name recognizer. The engine only
//! relies on the [`Detector`] contract, so this heuristic can be swapped for
//! an NLP-backed implementation without touching the rest of the pipeline.
//!
//! Current heuristic: an honorific (`Mr`, `Mrs`, `Ms`, `Miss`, `Dr`, `Prof`)
//! followed by one to three capitalized words. Only the words are reported,
//! the honorific stays in the text.

use super::{Detector, DetectorKind};
use crate::domain::{Result, ScrubError};
use crate::scrubber::models::RawSpan;
use regex::Regex;

const HONORIFIC_NAME_PATTERN: &str =
    r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof)\.?\s+((?:[A-Z][a-zA-Z'\-]+)(?:\s+[A-Z][a-zA-Z'\-]+){0,2})";

/// Name detector
pub struct NameDetector {
    regex: Regex,
}

impl NameDetector {
    /// Detector key and filth type
    pub const NAME: &'static str = "name";

    /// Create the name detector
    pub fn new() -> Result<Self> {
        let regex = Regex::new(HONORIFIC_NAME_PATTERN).map_err(|e| ScrubError::Pattern {
            name: Self::NAME.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }
}

impl Detector for NameDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> DetectorKind {
        DetectorKind::BuiltIn
    }

    fn scan(&self, text: &str) -> Result<Vec<RawSpan>> {
        Ok(self
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| RawSpan::new(m.start(), m.end(), Self::NAME, Self::NAME))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_name_after_honorific() {
        let detector = NameDetector::new().unwrap();
        let text = "Please forward this to Dr. Jane Smith today";
        let spans = detector.scan(text).unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Jane Smith");
        assert_eq!(spans[0].filth_type, "name");
    }

    #[test]
    fn test_ignores_plain_capitalized_words() {
        let detector = NameDetector::new().unwrap();
        let spans = detector.scan("Monday Morning Meeting").unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_multiple_names() {
        let detector = NameDetector::new().unwrap();
        let spans = detector
            .scan("Mr Brown met Mrs O'Neil and Prof. Ada King")
            .unwrap();
        assert_eq!(spans.len(), 3);
    }
}
