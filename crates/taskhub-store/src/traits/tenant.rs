//! Tenant store trait.

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::TenantId;
use taskhub_entity::tenant::Tenant;

/// Persistence contract for tenants.
#[async_trait]
pub trait TenantStore: Send + Sync + 'static {
    /// Find a tenant by its primary key.
    async fn find_by_id(&self, id: TenantId) -> AppResult<Option<Tenant>>;

    /// Insert a new tenant.
    async fn insert(&self, tenant: &Tenant) -> AppResult<()>;

    /// Update an existing tenant.
    async fn update(&self, tenant: &Tenant) -> AppResult<()>;
}
