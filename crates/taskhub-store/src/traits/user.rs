//! User store trait.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::user::User;

/// Persistence contract for users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by its primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Insert a new user.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Update an existing user.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Delete a user by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Count users belonging to a tenant (quota reconciliation source).
    async fn count_for_tenant(&self, tenant_id: TenantId) -> AppResult<u32>;
}
