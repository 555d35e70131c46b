//! Scrubbing engine
//!
//! Runs every detector of one registry snapshot over the input, resolves
//! overlapping spans and rewrites the text with placeholders.
//!
//! # Overlap resolution
//!
//! Raw spans from all detectors are sorted by `(start asc, end desc,
//! detector name asc)` and walked in that order. A span is accepted only if
//! it does not overlap an already accepted span. The earliest start wins,
//! then the widest span, then the lexicographically smaller detector name.
//! The result never depends on detector iteration order.

use crate::domain::{Result, ScrubError};
use crate::logging::fingerprint;
use crate::scrubber::models::{Classification, Detection, RawSpan, ScrubOutcome};
use crate::scrubber::redaction::apply_redactions;
use crate::scrubber::registry::{DetectorRegistry, DetectorSet};
use std::cmp::Reverse;
use std::sync::Arc;

/// Resolve overlapping raw spans
///
/// Returns the accepted spans ordered by start offset. Zero-width spans are
/// dropped.
pub fn merge_spans(mut spans: Vec<RawSpan>) -> Vec<RawSpan> {
    spans.retain(|span| !span.is_empty());
    spans.sort_by(|a, b| {
        (a.start, Reverse(a.end), &a.detector).cmp(&(b.start, Reverse(b.end), &b.detector))
    });

    let mut accepted: Vec<RawSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        // Accepted spans are disjoint and sorted, so only the last can collide
        let blocked = accepted.last().is_some_and(|last| span.overlaps(last));
        if !blocked {
            accepted.push(span);
        }
    }
    accepted
}

/// Scrubbing engine bound to a detector registry
#[derive(Clone)]
pub struct ScrubbingEngine {
    registry: Arc<DetectorRegistry>,
}

impl ScrubbingEngine {
    /// Create an engine over `registry`
    pub fn new(registry: Arc<DetectorRegistry>) -> Self {
        Self { registry }
    }

    /// Underlying registry (for reload and introspection)
    pub fn registry(&self) -> &Arc<DetectorRegistry> {
        &self.registry
    }

    /// Locate sensitive spans without rewriting the text
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Detection`] if any detector fails.
    pub fn scan(&self, text: &str) -> Result<Vec<Detection>> {
        let set = self.registry.snapshot();
        let spans = scan_spans(&set, text)?;
        Ok(to_detections(text, &spans))
    }

    /// Scan and replace every accepted span with `{{TYPE}}`
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Detection`] if any detector fails. No partial
    /// output is produced in that case.
    pub fn redact(&self, text: &str) -> Result<ScrubOutcome> {
        // One snapshot for both scanning and classification
        let set = self.registry.snapshot();
        let spans = scan_spans(&set, text)?;

        let anonymized = apply_redactions(text, &spans);
        let detections = to_detections(text, &spans);

        let secrets_count = detections
            .iter()
            .filter(|d| set.classify(d) == Classification::Secret)
            .count();
        let pii_count = detections.len() - secrets_count;

        for detection in &detections {
            tracing::debug!(
                detector = %detection.detector_name,
                filth_type = %detection.filth_type,
                start = detection.start,
                end = detection.end,
                fingerprint = %fingerprint(&detection.matched_text),
                "Redacted span"
            );
        }

        Ok(ScrubOutcome {
            original_length: text.chars().count(),
            anonymized_length: anonymized.chars().count(),
            detections_count: detections.len(),
            anonymized,
            detections,
            pii_count,
            secrets_count,
        })
    }
}

/// Run every detector in `set` and merge the results
fn scan_spans(set: &DetectorSet, text: &str) -> Result<Vec<RawSpan>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut raw = Vec::new();
    for detector in set.iter() {
        let spans = detector.scan(text)?;
        for span in &spans {
            validate_span(span, text)?;
        }
        raw.extend(spans);
    }

    Ok(merge_spans(raw))
}

fn validate_span(span: &RawSpan, text: &str) -> Result<()> {
    let in_bounds = span.start <= span.end && span.end <= text.len();
    if in_bounds && text.is_char_boundary(span.start) && text.is_char_boundary(span.end) {
        Ok(())
    } else {
        Err(ScrubError::Detection {
            detector: span.detector.clone(),
            message: format!("invalid span {}..{}", span.start, span.end),
        })
    }
}

/// Convert merged byte spans into character-indexed detections
fn to_detections(text: &str, spans: &[RawSpan]) -> Vec<Detection> {
    let mut detections = Vec::with_capacity(spans.len());
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for span in spans {
        char_pos += text[byte_pos..span.start].chars().count();
        let start = char_pos;
        let matched = &text[span.start..span.end];
        char_pos += matched.chars().count();
        byte_pos = span.end;

        detections.push(Detection {
            filth_type: span.filth_type.clone(),
            matched_text: matched.to_string(),
            start,
            end: char_pos,
            detector_name: span.detector.clone(),
        });
    }

    detections
}
