//! In-memory tenant store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::TenantId;
use taskhub_entity::tenant::Tenant;

use crate::traits::TenantStore;

/// In-memory tenant store for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryTenantStore {
    rows: Arc<RwLock<HashMap<TenantId, Tenant>>>,
}

impl MemoryTenantStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn find_by_id(&self, id: TenantId) -> AppResult<Option<Tenant>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, tenant: &Tenant) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&tenant.id) {
            return Err(AppError::conflict(format!(
                "Tenant {} already exists",
                tenant.id
            )));
        }
        rows.insert(tenant.id, tenant.clone());
        Ok(())
    }

    async fn update(&self, tenant: &Tenant) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&tenant.id) {
            Some(existing) => {
                *existing = tenant.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("Tenant {} not found", tenant.id))),
        }
    }
}
