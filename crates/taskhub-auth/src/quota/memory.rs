//! In-memory quota ledger using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use taskhub_core::result::AppResult;
use taskhub_core::traits::quota::{QuotaLedger, UsageSnapshot};
use taskhub_core::types::{ResourceKind, TenantId};

/// In-memory quota ledger using a Tokio mutex for atomicity.
///
/// The check `committed < ceiling` and the increment happen under one
/// lock acquisition, so concurrent reservations for the same tenant can
/// never both observe the last free slot. Suitable for single-node
/// deployments only.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuotaLedger {
    /// Committed counts per (tenant, kind).
    counts: Arc<Mutex<HashMap<(TenantId, ResourceKind), u32>>>,
}

impl MemoryQuotaLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuotaLedger for MemoryQuotaLedger {
    async fn try_increment(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        ceiling: u32,
    ) -> AppResult<bool> {
        let mut counts = self.counts.lock().await;
        let committed = counts.entry((tenant_id, kind)).or_insert(0);

        if *committed >= ceiling {
            return Ok(false);
        }

        *committed += 1;
        info!(
            tenant_id = %tenant_id,
            kind = %kind,
            committed = *committed,
            ceiling = ceiling,
            "quota slot reserved"
        );
        Ok(true)
    }

    async fn release(&self, tenant_id: TenantId, kind: ResourceKind) -> AppResult<()> {
        let mut counts = self.counts.lock().await;
        match counts.get_mut(&(tenant_id, kind)) {
            Some(committed) if *committed > 0 => {
                *committed -= 1;
                info!(
                    tenant_id = %tenant_id,
                    kind = %kind,
                    committed = *committed,
                    "quota slot released"
                );
            }
            _ => {
                warn!(
                    tenant_id = %tenant_id,
                    kind = %kind,
                    "attempted to release a quota slot that was not reserved"
                );
            }
        }
        Ok(())
    }

    async fn usage(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        ceiling: u32,
    ) -> AppResult<UsageSnapshot> {
        let counts = self.counts.lock().await;
        let committed = counts.get(&(tenant_id, kind)).copied().unwrap_or(0);
        Ok(UsageSnapshot { committed, ceiling })
    }

    async fn reconcile(
        &self,
        tenant_id: TenantId,
        kind: ResourceKind,
        actual_count: u32,
    ) -> AppResult<()> {
        let mut counts = self.counts.lock().await;
        let committed = counts.entry((tenant_id, kind)).or_insert(0);

        if *committed != actual_count {
            warn!(
                tenant_id = %tenant_id,
                kind = %kind,
                ledger_count = *committed,
                actual_count = actual_count,
                "drift detected between ledger and storage, reconciling"
            );
            *committed = actual_count;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::future::join_all;

    #[tokio::test]
    async fn test_increment_until_ceiling() {
        let ledger = MemoryQuotaLedger::new();
        let tenant = TenantId::new();

        assert!(ledger.try_increment(tenant, ResourceKind::Projects, 2).await.unwrap());
        assert!(ledger.try_increment(tenant, ResourceKind::Projects, 2).await.unwrap());
        assert!(!ledger.try_increment(tenant, ResourceKind::Projects, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_release_frees_a_slot() {
        let ledger = MemoryQuotaLedger::new();
        let tenant = TenantId::new();

        assert!(ledger.try_increment(tenant, ResourceKind::Users, 1).await.unwrap());
        assert!(!ledger.try_increment(tenant, ResourceKind::Users, 1).await.unwrap());

        ledger.release(tenant, ResourceKind::Users).await.unwrap();
        assert!(ledger.try_increment(tenant, ResourceKind::Users, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_kinds_are_independent() {
        let ledger = MemoryQuotaLedger::new();
        let tenant = TenantId::new();

        assert!(ledger.try_increment(tenant, ResourceKind::Users, 1).await.unwrap());
        assert!(ledger.try_increment(tenant, ResourceKind::Projects, 1).await.unwrap());
        assert!(!ledger.try_increment(tenant, ResourceKind::Users, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_reservations_never_overshoot() {
        let ledger = MemoryQuotaLedger::new();
        let tenant = TenantId::new();
        let ceiling = 3u32;
        let attempts = 20usize;

        let results = join_all((0..attempts).map(|_| {
            let ledger = ledger.clone();
            async move {
                ledger
                    .try_increment(tenant, ResourceKind::Projects, ceiling)
                    .await
                    .unwrap()
            }
        }))
        .await;

        let granted = results.iter().filter(|granted| **granted).count();
        assert_eq!(granted, ceiling as usize, "exactly the ceiling must succeed");

        let usage = ledger
            .usage(tenant, ResourceKind::Projects, ceiling)
            .await
            .unwrap();
        assert_eq!(usage.committed, ceiling);
    }

    #[tokio::test]
    async fn test_reconcile_corrects_drift() {
        let ledger = MemoryQuotaLedger::new();
        let tenant = TenantId::new();

        assert!(ledger.try_increment(tenant, ResourceKind::Users, 5).await.unwrap());
        ledger.reconcile(tenant, ResourceKind::Users, 4).await.unwrap();

        let usage = ledger.usage(tenant, ResourceKind::Users, 5).await.unwrap();
        assert_eq!(usage.committed, 4);
    }
}
