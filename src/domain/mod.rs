//! Domain types shared by every layer of Scrubgate.
//!
//! The domain layer provides:
//! - **Error types** ([`ScrubError`], [`AnonymizationError`], [`BackendError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, ScrubError>`]:
//!
//! ```rust,no_run
//! use scrubgate::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = scrubgate::config::load_config("scrubgate.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::{AnonymizationError, BackendError, ScrubError};
pub use result::Result;
