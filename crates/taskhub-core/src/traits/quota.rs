//! Quota ledger trait — the single contended shared resource.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ResourceKind, TenantId};

/// Snapshot of one tenant's usage for a resource kind.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct UsageSnapshot {
    /// Count of committed (durably created) resources.
    pub committed: u32,
    /// The plan ceiling in force when the snapshot was taken.
    pub ceiling: u32,
}

/// Trait for atomic per-tenant quota accounting.
///
/// Implementations must guarantee that the check `committed < ceiling`
/// and the increment are a single indivisible step with respect to
/// concurrent callers for the same `(tenant, kind)` pair. The enforcer
/// never performs a read-then-write check across two separate calls.
/// Two implementations are expected: a storage-backed one (transactional
/// compare-and-increment) and an in-memory one (`tokio::sync::Mutex`).
#[async_trait]
pub trait QuotaLedger: Send + Sync + 'static {
    /// Atomically increment the committed count if it is below `ceiling`.
    ///
    /// Returns `true` if the slot was reserved, `false` if the ceiling
    /// was already reached.
    async fn try_increment(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        ceiling: u32,
    ) -> AppResult<bool>;

    /// Decrement the committed count (reservation rollback or deletion).
    async fn release(&self, tenant_id: TenantId, kind: ResourceKind) -> AppResult<()>;

    /// Return the current usage for a tenant and kind.
    async fn usage(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        ceiling: u32,
    ) -> AppResult<UsageSnapshot>;

    /// Reconcile the ledger with an authoritative count from storage.
    ///
    /// Corrects drift after crashes or missed releases; typically invoked
    /// on startup or from a periodic job.
    async fn reconcile(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        actual_count: u32,
    ) -> AppResult<()>;
}
