//! Audit entry construction and best-effort forwarding.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use taskhub_core::config::AuditConfig;
use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::audit::{AuditOutcome, NewAuditEntry};
use taskhub_store::traits::AuditSink;

use crate::policy::Action;

/// Constructs audit entries from decisions and forwards them to the sink.
///
/// Appends are fire-and-forget: the primary operation never blocks on
/// audit completion and an append failure never rolls it back. Failures
/// are surfaced on the error log channel.
#[derive(Clone)]
pub struct AuditEmitter {
    sink: Arc<dyn AuditSink>,
    config: AuditConfig,
}

impl std::fmt::Debug for AuditEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditEmitter")
            .field("config", &self.config)
            .finish()
    }
}

impl AuditEmitter {
    /// Creates an emitter over the given sink.
    pub fn new(sink: Arc<dyn AuditSink>, config: AuditConfig) -> Self {
        Self { sink, config }
    }

    /// Record one state-changing decision.
    ///
    /// Denied outcomes are dropped unless the deployment opts into
    /// denial auditing. Pure reads must never be passed here.
    pub fn record(
        &self,
        actor_id: UserId,
        tenant_id: Option<TenantId>,
        action: Action,
        entity_id: Uuid,
        outcome: AuditOutcome,
        source_addr: Option<String>,
    ) {
        if outcome == AuditOutcome::Denied && !self.config.record_denials {
            return;
        }

        let entry = NewAuditEntry {
            tenant_id,
            actor_id,
            action: action.tag().to_string(),
            entity_type: action.entity_type().to_string(),
            entity_id,
            outcome,
            source_addr,
        };

        let sink = self.sink.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.append(entry).await {
                error!(error = %e, "failed to append audit entry");
            }
        });
    }
}
