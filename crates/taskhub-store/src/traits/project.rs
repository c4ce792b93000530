//! Project store trait.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{ProjectId, TenantId};
use taskhub_entity::project::Project;

/// Persistence contract for projects.
#[async_trait]
pub trait ProjectStore: Send + Sync + 'static {
    /// Find a project by its primary key.
    async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>>;

    /// Insert a new project.
    async fn insert(&self, project: &Project) -> AppResult<()>;

    /// Update an existing project.
    async fn update(&self, project: &Project) -> AppResult<()>;

    /// Delete a project by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: ProjectId) -> AppResult<bool>;

    /// Count projects belonging to a tenant (quota reconciliation source).
    async fn count_for_tenant(&self, tenant_id: TenantId) -> AppResult<u32>;
}
