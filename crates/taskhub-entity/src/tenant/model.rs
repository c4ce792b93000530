//! Tenant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{ResourceKind, TenantId};

use super::plan::Plan;
use super::status::TenantStatus;

/// An isolated organizational unit.
///
/// All tenant-scoped data carries this record's id. The authorization
/// core reads `status` and the ceilings; everything else belongs to the
/// storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Display name of the organization.
    pub name: String,
    /// Operational status.
    pub status: TenantStatus,
    /// Subscription plan.
    pub plan: Plan,
    /// Ceiling on member accounts.
    pub max_users: u32,
    /// Ceiling on projects.
    pub max_projects: u32,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new active tenant with the plan's default ceilings.
    pub fn new(name: impl Into<String>, plan: Plan) -> Self {
        Self {
            id: TenantId::new(),
            name: name.into(),
            status: TenantStatus::Active,
            plan,
            max_users: plan.default_max_users(),
            max_projects: plan.default_max_projects(),
            created_at: Utc::now(),
        }
    }

    /// The ceiling in force for a quota-governed resource kind.
    pub fn ceiling_for(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Users => self.max_users,
            ResourceKind::Projects => self.max_projects,
        }
    }

    /// Check if the tenant is in good standing.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
