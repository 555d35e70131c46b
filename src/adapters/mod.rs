//! External system integrations for Scrubgate.
//!
//! - [`anonymizer`] - HTTP client for the detection service
//! - [`backend`] - HTTP client for the LLM backend
//! - [`traits`] - the async seams the gateway is written against
//!
//! # Example
//!
//! ```rust,no_run
//! use scrubgate::adapters::{AnonymizationClient, Anonymizer};
//! use scrubgate::config::GatewayConfig;
//!
//! # async fn example() -> scrubgate::domain::Result<()> {
//! let client = AnonymizationClient::new(&GatewayConfig::default())?;
//! let redacted = client.anonymize("Contact me at john@example.com").await?;
//! # Ok(())
//! # }
//! ```

pub mod anonymizer;
pub mod backend;
pub mod traits;

pub use anonymizer::AnonymizationClient;
pub use backend::BackendClient;
pub use traits::{Anonymizer, ChatBackend, RelayedResponse};
