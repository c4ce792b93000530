//! Audit sink trait.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_entity::audit::{AuditEntry, NewAuditEntry};

/// Append-only persistence contract for audit entries.
///
/// Entries are never updated or deleted by the core. Appends are
/// best-effort from the caller's point of view: the emitter forwards
/// entries without blocking the primary operation on the result.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Append an entry to the log.
    async fn append(&self, entry: NewAuditEntry) -> AppResult<AuditEntry>;

    /// Return the most recent entries, newest first.
    async fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>>;
}
