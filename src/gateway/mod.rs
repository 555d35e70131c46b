//! Fail-safe forwarding gateway
//!
//! Redaction is a precondition for forwarding: a chat request whose
//! messages cannot all be anonymized is blocked and never reaches the
//! backend.

pub mod failsafe;
pub mod health;
pub mod messages;

pub use failsafe::{FailSafeGateway, GatewayOutcome};
pub use health::{ComponentStatus, GatewayHealth, HealthStatus};
pub use messages::{anonymize_messages, parse_chat_request};
