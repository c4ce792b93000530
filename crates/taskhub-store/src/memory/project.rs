//! In-memory project store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{ProjectId, TenantId};
use taskhub_entity::project::Project;

use crate::traits::ProjectStore;

/// In-memory project store for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectStore {
    rows: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl MemoryProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, project: &Project) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&project.id) {
            return Err(AppError::conflict(format!(
                "Project {} already exists",
                project.id
            )));
        }
        rows.insert(project.id, project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&project.id) {
            Some(existing) => {
                *existing = project.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Project {} not found",
                project.id
            ))),
        }
    }

    async fn delete(&self, id: ProjectId) -> AppResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn count_for_tenant(&self, tenant_id: TenantId) -> AppResult<u32> {
        let rows = self.rows.read().await;
        Ok(rows.values().filter(|p| p.tenant_id == tenant_id).count() as u32)
    }
}
