//! In-memory user store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::user::User;

use crate::traits::UserStore;

/// In-memory user store for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    rows: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&user.id) {
            return Err(AppError::conflict(format!("User {} already exists", user.id)));
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("User {} not found", user.id))),
        }
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn count_for_tenant(&self, tenant_id: TenantId) -> AppResult<u32> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|u| u.tenant_id == Some(tenant_id))
            .count() as u32)
    }
}
