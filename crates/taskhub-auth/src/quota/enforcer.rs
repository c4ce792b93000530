//! Atomic check-and-reserve against tenant resource ceilings.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{error, warn};

use taskhub_core::config::QuotaConfig;
use taskhub_core::error::AppError;
use taskhub_core::traits::quota::QuotaLedger;
use taskhub_core::types::{ResourceKind, TenantId};
use taskhub_entity::tenant::Tenant;

use crate::error::QuotaError;

/// A provisional claim on one quota slot.
///
/// Returned by a successful [`QuotaEnforcer::reserve`]. The creation step
/// consumes it with [`commit`](Self::commit) once the resource is durably
/// persisted; a failed creation must call [`release`](Self::release) so
/// the slot is returned to the pool.
pub struct QuotaReservation {
    slot: Option<ReservedSlot>,
}

struct ReservedSlot {
    ledger: Arc<dyn QuotaLedger>,
    tenant_id: TenantId,
    kind: ResourceKind,
}

impl std::fmt::Debug for QuotaReservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaReservation")
            .field("exempt", &self.slot.is_none())
            .finish()
    }
}

impl QuotaReservation {
    fn reserved(ledger: Arc<dyn QuotaLedger>, tenant_id: TenantId, kind: ResourceKind) -> Self {
        Self {
            slot: Some(ReservedSlot {
                ledger,
                tenant_id,
                kind,
            }),
        }
    }

    /// A reservation for a platform-level object; quota does not apply.
    fn exempt() -> Self {
        Self { slot: None }
    }

    /// Whether this reservation bypassed quota accounting.
    pub fn is_exempt(&self) -> bool {
        self.slot.is_none()
    }

    /// Finalize the reservation: the slot stays counted against the
    /// tenant's ceiling.
    pub fn commit(mut self) {
        self.slot.take();
    }

    /// Return the slot to the pool after a failed creation.
    pub async fn release(mut self) {
        if let Some(slot) = self.slot.take() {
            if let Err(e) = slot.ledger.release(slot.tenant_id, slot.kind).await {
                error!(
                    tenant_id = %slot.tenant_id,
                    kind = %slot.kind,
                    error = %e,
                    "failed to release quota reservation"
                );
            }
        }
    }
}

impl Drop for QuotaReservation {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            // A dropped reservation was neither committed nor released;
            // compensate in the background so the slot is not leaked.
            warn!(
                tenant_id = %slot.tenant_id,
                kind = %slot.kind,
                "quota reservation dropped without commit or release"
            );
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    if let Err(e) = slot.ledger.release(slot.tenant_id, slot.kind).await {
                        error!(error = %e, "failed to release dropped quota reservation");
                    }
                });
            }
        }
    }
}

/// Enforces per-tenant resource ceilings with an atomic reserve primitive.
///
/// The ledger owns atomicity; this type adds the retry/timeout policy and
/// the reservation lifecycle. There is never a separate count query
/// followed by an unguarded insert.
#[derive(Clone)]
pub struct QuotaEnforcer {
    ledger: Arc<dyn QuotaLedger>,
    config: QuotaConfig,
}

impl std::fmt::Debug for QuotaEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaEnforcer")
            .field("config", &self.config)
            .finish()
    }
}

impl QuotaEnforcer {
    /// Creates an enforcer over the given ledger.
    pub fn new(ledger: Arc<dyn QuotaLedger>, config: QuotaConfig) -> Self {
        Self { ledger, config }
    }

    /// Return a committed slot to the pool after a resource deletion.
    ///
    /// Best-effort: a failed release is logged and left to ledger
    /// reconciliation.
    pub async fn release_committed(&self, tenant_id: TenantId, kind: ResourceKind) {
        if let Err(e) = self.ledger.release(tenant_id, kind).await {
            error!(
                tenant_id = %tenant_id,
                kind = %kind,
                error = %e,
                "failed to release committed quota slot"
            );
        }
    }

    /// Atomically reserve one slot of `kind` for the tenant.
    ///
    /// `None` (platform-level objects) bypasses quota entirely. Transient
    /// storage faults are retried a bounded number of times with linear
    /// backoff; a reservation that cannot be decided fails closed.
    pub async fn reserve(
        &self,
        tenant: Option<&Tenant>,
        kind: ResourceKind,
    ) -> Result<QuotaReservation, QuotaError> {
        let Some(tenant) = tenant else {
            return Ok(QuotaReservation::exempt());
        };

        let ceiling = tenant.ceiling_for(kind);
        let deadline = Duration::from_millis(self.config.reserve_timeout_ms);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let outcome = timeout(deadline, self.ledger.try_increment(tenant.id, kind, ceiling))
                .await;

            match outcome {
                Err(_elapsed) => {
                    // The increment may or may not have landed; compensate
                    // in the background and fail closed.
                    warn!(
                        tenant_id = %tenant.id,
                        kind = %kind,
                        "quota reservation timed out"
                    );
                    let ledger = self.ledger.clone();
                    let tenant_id = tenant.id;
                    tokio::spawn(async move {
                        if let Err(e) = ledger.release(tenant_id, kind).await {
                            error!(error = %e, "failed to release timed-out reservation");
                        }
                    });
                    return Err(QuotaError::Storage(AppError::transient_storage(
                        "quota reservation timed out",
                    )));
                }
                Ok(Ok(true)) => {
                    return Ok(QuotaReservation::reserved(
                        self.ledger.clone(),
                        tenant.id,
                        kind,
                    ));
                }
                Ok(Ok(false)) => {
                    return Err(QuotaError::Exceeded { kind, ceiling });
                }
                Ok(Err(e)) if e.is_transient() && attempt <= self.config.max_retries => {
                    let backoff =
                        Duration::from_millis(self.config.retry_backoff_ms * u64::from(attempt));
                    warn!(
                        tenant_id = %tenant.id,
                        kind = %kind,
                        attempt = attempt,
                        error = %e,
                        "transient fault during quota reservation, retrying"
                    );
                    sleep(backoff).await;
                }
                Ok(Err(e)) => {
                    return Err(QuotaError::Storage(e));
                }
            }
        }
    }
}
