//! In-memory task store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{ProjectId, TaskId};
use taskhub_entity::task::Task;

use crate::traits::TaskStore;

/// In-memory task store for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    rows: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl MemoryTaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, task: &Task) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&task.id) {
            return Err(AppError::conflict(format!("Task {} already exists", task.id)));
        }
        rows.insert(task.id, task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("Task {} not found", task.id))),
        }
    }

    async fn delete(&self, id: TaskId) -> AppResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<Task>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }
}
