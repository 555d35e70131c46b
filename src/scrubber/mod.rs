//! Detection and redaction of sensitive text
//!
//! - [`detector`]: the detector contract, regex and name detectors, pattern files
//! - [`registry`]: the active detector set with atomic reload
//! - [`engine`]: overlap resolution and redaction
//!
//! # Examples
//!
//! ```no_run
//! use scrubgate::scrubber::{DetectorRegistry, DetectorSet, ScrubbingEngine};
//! use std::sync::Arc;
//!
//! # fn example() -> scrubgate::domain::Result<()> {
//! let set = DetectorSet::builder().with_builtins(true).build();
//! let engine = ScrubbingEngine::new(Arc::new(DetectorRegistry::with_set(set)));
//!
//! let outcome = engine.redact("Contact me at john@example.com")?;
//! assert_eq!(outcome.anonymized, "Contact me at {{EMAIL}}");
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod engine;
pub mod models;
pub mod redaction;
pub mod registry;

pub use detector::{Detector, DetectorKind, NameDetector, RegexDetector};
pub use engine::{merge_spans, ScrubbingEngine};
pub use models::{Classification, Detection, RawSpan, ScrubOutcome};
pub use redaction::placeholder;
pub use registry::{DetectorRegistry, DetectorSet, RegistrySource, ReloadReport};
