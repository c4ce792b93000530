//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{TenantId, UserId};

use super::role::Role;
use super::status::UserStatus;

/// A registered user in the TaskHub system.
///
/// A platform admin carries no tenant; every other user belongs to
/// exactly one tenant for its whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// The tenant this user belongs to; `None` for platform admins.
    pub tenant_id: Option<TenantId>,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub full_name: String,
    /// User role (RBAC).
    pub role: Role,
    /// Account status.
    pub status: UserStatus,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user record.
    pub fn new(
        tenant_id: Option<TenantId>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            tenant_id,
            username: username.into(),
            full_name: full_name.into(),
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this user is a platform admin.
    pub fn is_platform_admin(&self) -> bool {
        self.role.is_platform_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Target tenant. Required unless creating a platform admin; a
    /// tenant-bound caller's own tenant always wins over this field.
    pub tenant_id: Option<TenantId>,
    /// Desired username.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Assigned role.
    pub role: Role,
}

/// Data for updating an existing user.
///
/// `full_name` is a non-privileged field; `role` and `status` changes are
/// privileged and gated separately by the policy engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    pub full_name: Option<String>,
    /// New role (privileged).
    pub role: Option<Role>,
    /// New account status (privileged).
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    /// Whether this update touches privileged fields.
    pub fn is_privileged(&self) -> bool {
        self.role.is_some() || self.status.is_some()
    }
}
