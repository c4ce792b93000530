//! Actor role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the RBAC system.
///
/// There is no global privilege ordering: `PlatformAdmin` operates outside
/// any tenant, while `TenantAdmin` and `Member` are ranked only with
/// respect to action-specific rules in the policy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; not bound to any tenant.
    PlatformAdmin,
    /// Administrator of a single tenant.
    TenantAdmin,
    /// Regular member of a single tenant.
    Member,
}

impl Role {
    /// Check if this role is the platform operator role.
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, Self::PlatformAdmin)
    }

    /// Check if this role administers a tenant.
    pub fn is_tenant_admin(&self) -> bool {
        matches!(self, Self::TenantAdmin)
    }

    /// Whether a claim set carrying this role must name a tenant.
    ///
    /// Platform admins are tenant-less; everyone else belongs to exactly
    /// one tenant.
    pub fn requires_tenant(&self) -> bool {
        !self.is_platform_admin()
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlatformAdmin => "platform_admin",
            Self::TenantAdmin => "tenant_admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platform_admin" => Ok(Self::PlatformAdmin),
            "tenant_admin" => Ok(Self::TenantAdmin),
            "member" => Ok(Self::Member),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: platform_admin, tenant_admin, member"
            ))),
        }
    }
}
