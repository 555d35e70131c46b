// Scrubgate - PII redaction service and fail-safe LLM gateway
// Copyright (c) 2025 Scrubgate Contributors
// Licensed under the MIT License

//! # Scrubgate - PII redaction and fail-safe LLM forwarding
//!
//! Scrubgate removes personal data and credential-like secrets from text
//! before it reaches an external language-model backend.
//!
//! ## Overview
//!
//! Two services share this crate:
//! - **Detection service**: runs built-in and custom detectors over text,
//!   resolves overlapping matches and replaces them with `{{TYPE}}` tokens
//! - **Gateway**: an OpenAI-compatible proxy that anonymizes every chat
//!   message through the detection service and blocks the request if that
//!   fails for any reason
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`scrubber`] - Detectors, the hot-reloadable detector registry and the engine
//! - [`gateway`] - The fail-safe forwarding pipeline
//! - [`server`] - axum routers for both services
//! - [`adapters`] - HTTP clients for the detection service and the backend
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrubgate::scrubber::{DetectorRegistry, RegistrySource, ScrubbingEngine};
//! use std::sync::Arc;
//!
//! # fn main() -> scrubgate::domain::Result<()> {
//! let (registry, report) = DetectorRegistry::load(RegistrySource {
//!     patterns_file: "patterns.json".into(),
//!     enable_name_detector: true,
//! });
//! println!("{} detectors active", report.detectors.len());
//!
//! let engine = ScrubbingEngine::new(Arc::new(registry));
//! let outcome = engine.redact("My API key is sk-abc123xyz789012345678901234567890")?;
//! println!("{}", outcome.anonymized);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::ScrubError`]. On the gateway side every
//! [`domain::AnonymizationError`] ends the request as blocked.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod logging;
pub mod scrubber;
pub mod server;
