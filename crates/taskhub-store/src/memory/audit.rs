//! In-memory audit sink.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::result::AppResult;
use taskhub_entity::audit::{AuditEntry, NewAuditEntry};

use crate::traits::AuditSink;

/// In-memory append-only audit sink for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl MemoryAuditSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries appended so far.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the sink holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, entry: NewAuditEntry) -> AppResult<AuditEntry> {
        let entry = entry.into_entry();
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
