//! Access gate: credential validation and tenant standing.

use std::sync::Arc;

use taskhub_auth::error::AuthzError;
use taskhub_auth::jwt::{Claims, JwtDecoder};
use taskhub_auth::scope::{EffectiveScope, resolve_scope};
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{TenantId, UserId};
use taskhub_store::traits::TenantStore;

/// A fully authenticated actor with its resolved tenant scope.
///
/// Construction goes through [`AccessGate::authenticate`] only; holding
/// an `Actor` means the credential verified, the scope resolved, and the
/// bound tenant (if any) exists and is in good standing.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Verified identity claims.
    pub claims: Claims,
    /// Resolved tenant scope.
    pub scope: EffectiveScope,
}

impl Actor {
    /// The acting user's ID.
    pub fn actor_id(&self) -> UserId {
        self.claims.sub
    }

    /// The bound tenant, if any.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.scope.tenant_id()
    }
}

/// Runs the first two pipeline stages for every incoming request.
///
/// Any stage failure short-circuits: no downstream component sees a
/// request that did not authenticate, and no audit entry is written for
/// one.
#[derive(Clone)]
pub struct AccessGate {
    decoder: JwtDecoder,
    tenants: Arc<dyn TenantStore>,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish()
    }
}

impl AccessGate {
    /// Creates a new access gate.
    pub fn new(decoder: JwtDecoder, tenants: Arc<dyn TenantStore>) -> Self {
        Self { decoder, tenants }
    }

    /// Validate a credential and resolve the effective tenant scope.
    ///
    /// `requested_tenant` is the routing hint (e.g. a path parameter);
    /// it is checked for agreement with the claims and never trusted as
    /// a source of scope. For bound scopes the tenant must exist and be
    /// active.
    pub async fn authenticate(
        &self,
        token: &str,
        requested_tenant: Option<TenantId>,
    ) -> AppResult<Actor> {
        let claims = self.decoder.decode(token)?;
        let scope = resolve_scope(&claims, requested_tenant)?;

        if let EffectiveScope::Bound(tenant_id) = scope {
            let tenant = self
                .tenants
                .find_by_id(tenant_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Tenant {tenant_id} not found")))?;

            if !tenant.is_active() {
                return Err(AuthzError::TenantSuspended.into());
            }
        }

        Ok(Actor { claims, scope })
    }
}
