//! User operations: create, update, delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use taskhub_auth::audit::AuditEmitter;
use taskhub_auth::policy::{Action, PolicyEngine, TargetSnapshot};
use taskhub_auth::quota::QuotaEnforcer;
use taskhub_auth::scope::EffectiveScope;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{ResourceKind, TenantId, UserId};
use taskhub_entity::audit::AuditOutcome;
use taskhub_entity::tenant::Tenant;
use taskhub_entity::user::{NewUser, User, UserUpdate};
use taskhub_store::traits::{TenantStore, UserStore};

use crate::access::Actor;
use crate::context::RequestContext;

/// User management service.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    tenants: Arc<dyn TenantStore>,
    policy: PolicyEngine,
    quota: QuotaEnforcer,
    audit: AuditEmitter,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        tenants: Arc<dyn TenantStore>,
        policy: PolicyEngine,
        quota: QuotaEnforcer,
        audit: AuditEmitter,
    ) -> Self {
        Self {
            users,
            tenants,
            policy,
            quota,
            audit,
        }
    }

    /// Create a user, reserving a member slot against the tenant's plan.
    ///
    /// Platform admins are tenant-less and quota-exempt; for tenant-bound
    /// callers the caller's own tenant always wins over the request body.
    pub async fn create_user(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        req: NewUser,
    ) -> AppResult<User> {
        let target_tenant = if req.role.is_platform_admin() {
            None
        } else {
            match actor.scope {
                EffectiveScope::Bound(tenant_id) => Some(tenant_id),
                EffectiveScope::Unrestricted => Some(req.tenant_id.ok_or_else(|| {
                    AppError::validation("tenant_id is required when creating a tenant user")
                })?),
            }
        };

        let snapshot = TargetSnapshot::tenant(target_tenant);
        self.decide(actor, ctx, Action::CreateUser, &snapshot, Uuid::nil())?;

        let tenant = match target_tenant {
            Some(tenant_id) => Some(self.load_tenant(tenant_id).await?),
            None => None,
        };

        let reservation = match self.quota.reserve(tenant.as_ref(), ResourceKind::Users).await {
            Ok(reservation) => reservation,
            Err(deny) => {
                self.audit.record(
                    actor.actor_id(),
                    target_tenant,
                    Action::CreateUser,
                    Uuid::nil(),
                    AuditOutcome::Denied,
                    ctx.source_addr.clone(),
                );
                return Err(deny.into());
            }
        };

        let user = User::new(target_tenant, req.username, req.full_name, req.role);
        if let Err(e) = self.users.insert(&user).await {
            reservation.release().await;
            return Err(e);
        }
        reservation.commit();

        info!(user_id = %user.id, role = %user.role, "user created");
        self.audit.record(
            actor.actor_id(),
            target_tenant,
            Action::CreateUser,
            user.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(user)
    }

    /// Update a user.
    ///
    /// Profile fields may be changed by the user themself; role and
    /// status changes are privileged.
    pub async fn update_user(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        user_id: UserId,
        update: UserUpdate,
    ) -> AppResult<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        let action = if update.is_privileged() {
            Action::UpdateUserPrivileged
        } else {
            Action::UpdateUserProfile
        };

        let snapshot = TargetSnapshot::user(user.tenant_id, user.id);
        self.decide(actor, ctx, action, &snapshot, user.id.into_uuid())?;

        if let Some(role) = update.role {
            // Role changes may not break the role/tenant pairing invariant.
            if role.is_platform_admin() && user.tenant_id.is_some() {
                return Err(AppError::validation(
                    "a tenant-bound user cannot be promoted to platform admin",
                ));
            }
            if role.requires_tenant() && user.tenant_id.is_none() {
                return Err(AppError::validation(
                    "a tenant-less user cannot be demoted to a tenant role",
                ));
            }
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;

        self.audit.record(
            actor.actor_id(),
            user.tenant_id,
            action,
            user.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(user)
    }

    /// Delete a user and return the member slot to the tenant's pool.
    ///
    /// Deleting one's own account is always denied.
    pub async fn delete_user(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

        let snapshot = TargetSnapshot::user(user.tenant_id, user.id);
        self.decide(actor, ctx, Action::DeleteUser, &snapshot, user.id.into_uuid())?;

        let deleted = self.users.delete(user.id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }

        if let Some(tenant_id) = user.tenant_id {
            self.quota
                .release_committed(tenant_id, ResourceKind::Users)
                .await;
        }
        info!(user_id = %user.id, "user deleted");

        self.audit.record(
            actor.actor_id(),
            user.tenant_id,
            Action::DeleteUser,
            user.id.into_uuid(),
            AuditOutcome::Allowed,
            ctx.source_addr.clone(),
        );
        Ok(())
    }

    fn decide(
        &self,
        actor: &Actor,
        ctx: &RequestContext,
        action: Action,
        target: &TargetSnapshot,
        entity_id: Uuid,
    ) -> AppResult<()> {
        if let Err(deny) = self
            .policy
            .decide(&actor.claims, &actor.scope, action, target)
        {
            self.audit.record(
                actor.actor_id(),
                target.tenant_id,
                action,
                entity_id,
                AuditOutcome::Denied,
                ctx.source_addr.clone(),
            );
            return Err(deny.into());
        }
        Ok(())
    }

    async fn load_tenant(&self, tenant_id: TenantId) -> AppResult<Tenant> {
        self.tenants
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))
    }
}
