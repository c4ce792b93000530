//! Audit log entry entity model.
//!
//! Field names are a compatibility contract for downstream audit
//! consumers; renaming any of them is a breaking change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::types::{AuditEntryId, TenantId, UserId};

/// Outcome recorded for an audited decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// The action was allowed and applied.
    Allowed,
    /// The action was denied.
    Denied,
}

/// An immutable audit log entry recording a state-changing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique audit entry identifier.
    pub id: AuditEntryId,
    /// Tenant the action was scoped to; `None` for platform-level actions.
    pub tenant_id: Option<TenantId>,
    /// The user who performed the action.
    pub actor_id: UserId,
    /// The action that was performed (e.g. `"project.create"`).
    pub action: String,
    /// The type of target entity (e.g. `"project"`, `"user"`).
    pub entity_type: String,
    /// The target entity ID.
    pub entity_id: Uuid,
    /// Whether the action was allowed or denied.
    pub outcome: AuditOutcome,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
    /// Network address the request originated from.
    pub source_addr: Option<String>,
}

/// Data required to create a new audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditEntry {
    /// Tenant the action was scoped to.
    pub tenant_id: Option<TenantId>,
    /// The user who performed the action.
    pub actor_id: UserId,
    /// The action performed.
    pub action: String,
    /// Target entity type.
    pub entity_type: String,
    /// Target entity ID.
    pub entity_id: Uuid,
    /// Decision outcome.
    pub outcome: AuditOutcome,
    /// Request origin address.
    pub source_addr: Option<String>,
}

impl NewAuditEntry {
    /// Materialize the entry with a fresh id and timestamp.
    pub fn into_entry(self) -> AuditEntry {
        AuditEntry {
            id: AuditEntryId::new(),
            tenant_id: self.tenant_id,
            actor_id: self.actor_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            outcome: self.outcome,
            created_at: Utc::now(),
            source_addr: self.source_addr,
        }
    }
}
