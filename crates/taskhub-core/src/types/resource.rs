//! Quota-governed resource kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The resource kinds whose per-tenant counts are bounded by plan ceilings.
///
/// Tasks are deliberately absent: only directly tenant-scoped resources
/// are quota-governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Tenant member accounts.
    Users,
    /// Projects within a tenant.
    Projects,
}

impl ResourceKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
