//! Audit emission configuration.

use serde::{Deserialize, Serialize};

/// Audit trail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether denied actions are also recorded.
    ///
    /// Off by default; deployments with security-denial auditing
    /// requirements opt in explicitly.
    #[serde(default)]
    pub record_denials: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            record_denials: false,
        }
    }
}
