//! Quota enforcement configuration.

use serde::{Deserialize, Serialize};

/// Retry and timeout behavior for quota reservations.
///
/// Retries apply to transient storage faults only; a genuine
/// `QUOTA_EXCEEDED` outcome is never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum reservation attempts on transient storage faults.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff between retries, in milliseconds (linear).
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
    /// Deadline for a single reservation round-trip, in milliseconds.
    #[serde(default = "default_reserve_timeout")]
    pub reserve_timeout_ms: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff(),
            reserve_timeout_ms: default_reserve_timeout(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    50
}

fn default_reserve_timeout() -> u64 {
    5000
}
