//! Placeholder rendering and text rewriting

use crate::scrubber::models::RawSpan;

/// Placeholder token for a filth type, e.g. `{{EMAIL}}`
pub fn placeholder(filth_type: &str) -> String {
    format!("{{{{{}}}}}", filth_type.to_uppercase())
}

/// Replace every span with its placeholder
///
/// `spans` must be non-overlapping and lie on character boundaries of
/// `text`. Replacement runs from the highest start offset to the lowest so
/// that pending offsets stay valid.
pub fn apply_redactions(text: &str, spans: &[RawSpan]) -> String {
    let mut ordered: Vec<&RawSpan> = spans.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut redacted = text.to_string();
    for span in ordered {
        redacted.replace_range(span.start..span.end, &placeholder(&span.filth_type));
    }
    redacted
}
