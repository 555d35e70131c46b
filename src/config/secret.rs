//! Backend credential held with the secrecy crate
//!
//! The key is zeroed on drop and prints as `[REDACTED]` in `Debug` output.
//!
//! ```rust
//! use scrubgate::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let key = secret_string("sk-live-key".to_string());
//! assert_eq!(key.expose_secret().as_str(), "sk-live-key");
//! assert!(!format!("{key:?}").contains("sk-live-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::Deserialize;
use zeroize::Zeroize;

/// Credential text, only reachable through [`secrecy::ExposeSecret`]
#[derive(Clone, Zeroize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl SecretValue {
    /// Raw credential for the `Authorization` header
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Credential read from configuration
pub type SecretString = Secret<SecretValue>;

/// Wrap a plain string, e.g. from an environment override
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}
