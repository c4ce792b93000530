//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{ProjectId, TenantId, UserId};

use super::status::ProjectStatus;

/// A project directly scoped to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Owning tenant; fixed at creation.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// The user who created the project.
    pub created_by: UserId,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new active project inside a tenant.
    pub fn new(tenant_id: TenantId, name: impl Into<String>, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            tenant_id,
            name: name.into(),
            created_by,
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    /// Target tenant. A tenant-bound caller's own tenant always wins
    /// over this field; it is required only for platform admins.
    pub tenant_id: Option<TenantId>,
    /// Display name.
    pub name: String,
}

/// Data for updating an existing project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New lifecycle status.
    pub status: Option<ProjectStatus>,
}
