//! Detection data models

use serde::{Deserialize, Serialize};

/// Raw match produced by a single detector before overlap resolution
///
/// Offsets are byte offsets into the scanned `&str` and always fall on
/// character boundaries. The range is half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSpan {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Filth type used for the placeholder
    pub filth_type: String,
    /// Name of the detector that produced the span
    pub detector: String,
}

impl RawSpan {
    /// Create a new raw span
    pub fn new(
        start: usize,
        end: usize,
        filth_type: impl Into<String>,
        detector: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            filth_type: filth_type.into(),
            detector: detector.into(),
        }
    }

    /// Width in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Zero-width spans carry nothing to redact
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open range intersection
    pub fn overlaps(&self, other: &RawSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One accepted span of sensitive text
///
/// Offsets are character offsets (Unicode scalar values), half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Filth type, e.g. `email` or `openai_key`
    #[serde(rename = "type")]
    pub filth_type: String,
    /// The sensitive text itself
    #[serde(rename = "text")]
    pub matched_text: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Detector that produced this detection
    #[serde(rename = "detector")]
    pub detector_name: String,
}

/// Whether a detection is personal data or a credential-like secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Found by a built-in or statistical detector
    Pii,
    /// Found by a dynamically configured detector
    Secret,
}

/// Result of one redaction call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubOutcome {
    /// Redacted text
    pub anonymized: String,
    /// Length of the input in characters
    pub original_length: usize,
    /// Length of the output in characters
    pub anonymized_length: usize,
    /// Number of detections
    pub detections_count: usize,
    /// Accepted detections, ordered by start offset
    pub detections: Vec<Detection>,
    /// Detections classified as PII
    pub pii_count: usize,
    /// Detections classified as secrets
    pub secrets_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_span_overlap() {
        let a = RawSpan::new(5, 15, "a", "a");
        let b = RawSpan::new(5, 10, "b", "b");
        let c = RawSpan::new(15, 20, "c", "c");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Half-open: touching spans do not overlap
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_raw_span_empty() {
        assert!(RawSpan::new(3, 3, "x", "x").is_empty());
        assert_eq!(RawSpan::new(3, 7, "x", "x").len(), 4);
    }

    #[test]
    fn test_detection_wire_format() {
        let detection = Detection {
            filth_type: "email".to_string(),
            matched_text: "john@example.com".to_string(),
            start: 14,
            end: 30,
            detector_name: "email".to_string(),
        };

        let value = serde_json::to_value(&detection).unwrap();
        assert_eq!(value["type"], "email");
        assert_eq!(value["text"], "john@example.com");
        assert_eq!(value["start"], 14);
        assert_eq!(value["end"], 30);
        assert_eq!(value["detector"], "email");
    }
}
