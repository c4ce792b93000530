//! Subscription plan enumeration with default resource ceilings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription plan of a tenant.
///
/// Plans determine the default per-resource ceilings; a tenant record may
/// carry overridden ceilings negotiated out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Entry plan.
    Free,
    /// Paid plan.
    Pro,
    /// Contract plan.
    Enterprise,
}

impl Plan {
    /// Default ceiling on member accounts for this plan.
    pub fn default_max_users(&self) -> u32 {
        match self {
            Self::Free => 5,
            Self::Pro => 50,
            Self::Enterprise => 500,
        }
    }

    /// Default ceiling on projects for this plan.
    pub fn default_max_projects(&self) -> u32 {
        match self {
            Self::Free => 3,
            Self::Pro => 25,
            Self::Enterprise => 250,
        }
    }

    /// Return the plan as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
