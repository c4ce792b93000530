//! Task store trait.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{ProjectId, TaskId};
use taskhub_entity::task::Task;

/// Persistence contract for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Find a task by its primary key.
    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>>;

    /// Insert a new task.
    async fn insert(&self, task: &Task) -> AppResult<()>;

    /// Update an existing task.
    async fn update(&self, task: &Task) -> AppResult<()>;

    /// Delete a task by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: TaskId) -> AppResult<bool>;

    /// List the tasks of a project.
    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<Task>>;
}
