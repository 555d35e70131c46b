//! Aggregate gateway health

use serde::{Deserialize, Serialize};

/// Overall gateway status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Reachability of the detection service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Unreachable,
}

/// Gateway health report
///
/// Reporting only. A degraded status never relaxes the blocking of
/// requests that cannot be anonymized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHealth {
    pub status: HealthStatus,
    pub service: String,
    pub anonymizer: ComponentStatus,
}

impl GatewayHealth {
    /// Build the report from the anonymizer probe result
    pub fn from_probe(anonymizer_reachable: bool) -> Self {
        let (status, anonymizer) = if anonymizer_reachable {
            (HealthStatus::Healthy, ComponentStatus::Ok)
        } else {
            (HealthStatus::Degraded, ComponentStatus::Unreachable)
        };

        Self {
            status,
            service: "gateway".to_string(),
            anonymizer,
        }
    }
}
