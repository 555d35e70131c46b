//! Detector registry with atomic hot-reload
//!
//! A [`DetectorSet`] is immutable once built. The [`DetectorRegistry`] holds
//! the current set behind an `Arc` pointer; scans clone the pointer and work
//! on that snapshot, reloads build a brand-new set and swap the pointer.
//! Neither side ever holds the lock while scanning or reading files.

use crate::domain::Result;
use crate::scrubber::detector::patterns::{builtin_detectors, PatternDefinitions, SkippedPattern};
use crate::scrubber::detector::{Detector, DetectorKind, RegexDetector};
use crate::scrubber::models::{Classification, Detection};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable mapping from detector name to detector
#[derive(Debug, Default)]
pub struct DetectorSet {
    detectors: BTreeMap<String, Arc<dyn Detector>>,
    custom_names: BTreeSet<String>,
}

impl DetectorSet {
    /// Start building a set
    pub fn builder() -> DetectorSetBuilder {
        DetectorSetBuilder::default()
    }

    /// Number of active detectors
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// True when no detector is active
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Active detector names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.detectors.keys().cloned().collect()
    }

    /// Look up a detector by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Detector>> {
        self.detectors.get(name)
    }

    /// Iterate detectors in name order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Detector>> {
        self.detectors.values()
    }

    /// True if `name` was configured as a custom detector
    pub fn is_custom(&self, name: &str) -> bool {
        self.custom_names.contains(name)
    }

    /// Secret if the detection came from a configured custom detector, PII otherwise
    pub fn classify(&self, detection: &Detection) -> Classification {
        if self.is_custom(&detection.detector_name) {
            Classification::Secret
        } else {
            Classification::Pii
        }
    }
}

/// Builder for [`DetectorSet`]
#[derive(Default)]
pub struct DetectorSetBuilder {
    detectors: BTreeMap<String, Arc<dyn Detector>>,
    custom_names: BTreeSet<String>,
    loaded: usize,
    skipped: Vec<SkippedPattern>,
}

impl DetectorSetBuilder {
    /// Add the full built-in set
    pub fn with_builtins(mut self, enable_name_detector: bool) -> Self {
        for detector in builtin_detectors(enable_name_detector) {
            self.detectors.insert(detector.name().to_string(), detector);
        }
        self
    }

    /// Add an arbitrary detector, replacing any detector with the same name
    pub fn with_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detectors.insert(detector.name().to_string(), detector);
        self
    }

    /// Overlay one custom pattern
    ///
    /// Any detector already registered under `name` is removed first, so a
    /// custom pattern always takes precedence over a built-in. If the pattern
    /// does not compile the name stays absent and the failure is recorded.
    pub fn overlay_custom(mut self, name: &str, pattern: &str) -> Self {
        self.claim_custom_name(name);

        match RegexDetector::custom(name, pattern) {
            Ok(detector) => {
                self.detectors.insert(name.to_string(), Arc::new(detector));
                self.loaded += 1;
            }
            Err(e) => {
                crate::log_detector_skipped!(name, e);
                self.skipped.push(SkippedPattern {
                    name: name.to_string(),
                    reason: e.to_string(),
                });
            }
        }
        self
    }

    /// Overlay every entry of a definitions file
    pub fn overlay_definitions(mut self, definitions: &PatternDefinitions) -> Self {
        for skipped in &definitions.skipped {
            self.claim_custom_name(&skipped.name);
            crate::log_detector_skipped!(skipped.name, skipped.reason);
            self.skipped.push(skipped.clone());
        }
        for (name, pattern) in &definitions.entries {
            self = self.overlay_custom(name, pattern);
        }
        self
    }

    /// Mark `name` as custom and evict whatever was registered under it
    ///
    /// Runs before the pattern is even looked at, so a broken entry still
    /// shadows the built-in of the same name.
    fn claim_custom_name(&mut self, name: &str) {
        self.custom_names.insert(name.to_string());
        if self.detectors.remove(name).is_some() {
            tracing::info!(detector = %name, "Overwriting default detector");
        }
    }

    /// Finish the set, returning the reload statistics alongside it
    pub fn build_with_report(self) -> (DetectorSet, ReloadReport) {
        let set = DetectorSet {
            detectors: self.detectors,
            custom_names: self.custom_names,
        };
        let report = ReloadReport {
            loaded: self.loaded,
            skipped: self.skipped,
            detectors: set.names(),
            loaded_at: Utc::now(),
        };
        (set, report)
    }

    /// Finish the set
    pub fn build(self) -> DetectorSet {
        self.build_with_report().0
    }
}

/// Outcome of a (re)load
#[derive(Debug, Clone, Serialize)]
pub struct ReloadReport {
    /// Custom detectors successfully compiled
    pub loaded: usize,
    /// Custom entries that were rejected
    pub skipped: Vec<SkippedPattern>,
    /// Names of all active detectors after the load
    pub detectors: Vec<String>,
    /// When the set was built
    pub loaded_at: DateTime<Utc>,
}

/// Where the registry reads its definitions from
#[derive(Debug, Clone)]
pub struct RegistrySource {
    /// Custom patterns file
    pub patterns_file: PathBuf,
    /// Register the name detector among the built-ins
    pub enable_name_detector: bool,
}

impl RegistrySource {
    /// Build a fresh set from the source
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the patterns file exists but cannot
    /// be read or is not a mapping. Bad individual entries never error.
    pub fn build(&self) -> Result<(DetectorSet, ReloadReport)> {
        let builder = DetectorSet::builder().with_builtins(self.enable_name_detector);

        let builder = match PatternDefinitions::load(&self.patterns_file)? {
            Some(definitions) => builder.overlay_definitions(&definitions),
            None => {
                tracing::info!(
                    patterns_file = %self.patterns_file.display(),
                    "No patterns file, using built-in detectors only"
                );
                builder
            }
        };

        Ok(builder.build_with_report())
    }
}

/// Holder of the current detector set
pub struct DetectorRegistry {
    current: RwLock<Arc<DetectorSet>>,
    source: Option<RegistrySource>,
}

impl DetectorRegistry {
    /// Wrap a fixed set with no backing file
    ///
    /// [`reload`](Self::reload) keeps this set as it is.
    pub fn with_set(set: DetectorSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(set)),
            source: None,
        }
    }

    /// Load the registry from a source at startup
    ///
    /// A configuration error here does not stop the service: it is logged
    /// and the registry starts with the built-in detectors.
    pub fn load(source: RegistrySource) -> (Self, ReloadReport) {
        let (set, report) = match source.build() {
            Ok(built) => built,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load patterns, starting with built-in detectors");
                DetectorSet::builder()
                    .with_builtins(source.enable_name_detector)
                    .build_with_report()
            }
        };

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            detectors = report.detectors.len(),
            "Detector set initialized"
        );

        let registry = Self {
            current: RwLock::new(Arc::new(set)),
            source: Some(source),
        };
        (registry, report)
    }

    /// Consistent snapshot of the active set
    pub fn snapshot(&self) -> Arc<DetectorSet> {
        Arc::clone(&self.current.read())
    }

    /// Atomically replace the active set
    pub fn swap(&self, set: DetectorSet) -> Arc<DetectorSet> {
        let next = Arc::new(set);
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild the set from the source and swap it in
    ///
    /// # Errors
    ///
    /// Returns a configuration error (and keeps the previous set) when the
    /// patterns file cannot be read or is not a mapping.
    pub fn reload(&self) -> Result<ReloadReport> {
        let Some(source) = &self.source else {
            return Ok(self.current_report());
        };

        let (set, report) = source.build()?;
        self.swap(set);

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            detectors = report.detectors.len(),
            "Detector set reloaded"
        );

        Ok(report)
    }

    fn current_report(&self) -> ReloadReport {
        let set = self.snapshot();
        ReloadReport {
            loaded: set
                .iter()
                .filter(|detector| detector.kind() == DetectorKind::Custom)
                .count(),
            skipped: Vec::new(),
            detectors: set.names(),
            loaded_at: Utc::now(),
        }
    }

    /// Names of the active detectors
    pub fn detector_names(&self) -> Vec<String> {
        self.snapshot().names()
    }

    /// Number of active detectors
    pub fn detector_count(&self) -> usize {
        self.snapshot().len()
    }
}
