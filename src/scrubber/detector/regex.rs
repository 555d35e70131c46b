//! Regex-based detector
//!
//! One generic detector type parameterized by name, compiled pattern and
//! kind. Built-in patterns use the `regex` crate; custom patterns are
//! compiled with `fancy-regex` so look-around and back-references written
//! for other regex engines keep working.

use super::{Detector, DetectorKind};
use crate::domain::{Result, ScrubError};
use crate::scrubber::models::RawSpan;

enum Matcher {
    Standard(::regex::Regex),
    Extended(fancy_regex::Regex),
}

/// Regex-based detector
pub struct RegexDetector {
    name: String,
    filth_type: String,
    kind: DetectorKind,
    matcher: Matcher,
}

impl RegexDetector {
    /// Create a built-in detector from a `regex`-syntax pattern
    pub fn builtin(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = ::regex::Regex::new(pattern).map_err(|e| ScrubError::Pattern {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            filth_type: name.clone(),
            name,
            kind: DetectorKind::BuiltIn,
            matcher: Matcher::Standard(regex),
        })
    }

    /// Create a custom detector from a configured pattern
    ///
    /// The filth type equals the detector name, so a pattern named
    /// `openai_key` redacts to `{{OPENAI_KEY}}`.
    pub fn custom(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = fancy_regex::Regex::new(pattern).map_err(|e| ScrubError::Pattern {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            filth_type: name.clone(),
            name,
            kind: DetectorKind::Custom,
            matcher: Matcher::Extended(regex),
        })
    }
}

impl Detector for RegexDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn filth_type(&self) -> &str {
        &self.filth_type
    }

    fn kind(&self) -> DetectorKind {
        self.kind
    }

    fn scan(&self, text: &str) -> Result<Vec<RawSpan>> {
        let mut spans = Vec::new();

        match &self.matcher {
            Matcher::Standard(re) => {
                for m in re.find_iter(text) {
                    if m.start() < m.end() {
                        spans.push(RawSpan::new(
                            m.start(),
                            m.end(),
                            &self.filth_type,
                            &self.name,
                        ));
                    }
                }
            }
            Matcher::Extended(re) => {
                for m in re.find_iter(text) {
                    // Backtracking limits surface here as runtime errors
                    let m = m.map_err(|e| ScrubError::Detection {
                        detector: self.name.clone(),
                        message: e.to_string(),
                    })?;
                    if m.start() < m.end() {
                        spans.push(RawSpan::new(
                            m.start(),
                            m.end(),
                            &self.filth_type,
                            &self.name,
                        ));
                    }
                }
            }
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_detector_scan() {
        let detector =
            RegexDetector::builtin("email", r"[a-z]+@[a-z]+\.com").unwrap();
        let spans = detector.scan("Contact me at john@example.com").unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 14);
        assert_eq!(spans[0].end, 30);
        assert_eq!(spans[0].filth_type, "email");
        assert_eq!(detector.kind(), DetectorKind::BuiltIn);
    }

    #[test]
    fn test_custom_detector_supports_lookahead() {
        let detector = RegexDetector::custom("api_key", r"key=(?=\w{6})\w+").unwrap();
        let spans = detector.scan("key=abc123 key=ab").unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(detector.kind(), DetectorKind::Custom);
        assert_eq!(detector.filth_type(), "api_key");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = RegexDetector::custom("foo", "(unclosed").err().unwrap();
        assert!(matches!(err, ScrubError::Pattern { ref name, .. } if name == "foo"));

        assert!(RegexDetector::builtin("bar", "[z-a]").is_err());
    }

    #[test]
    fn test_zero_width_matches_discarded() {
        let detector = RegexDetector::custom("maybe", r"x*").unwrap();
        let spans = detector.scan("abc xx def").unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (4, 6));
    }
}
