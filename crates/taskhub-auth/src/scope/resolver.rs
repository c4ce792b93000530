//! Tenant scope resolution.
//!
//! The single place where client-supplied tenant identifiers meet the
//! verified claims. Handlers pass any path/query tenant id through here
//! as a hint; the hint is only ever checked for agreement, never trusted
//! as a source of scope.

use serde::{Deserialize, Serialize};

use taskhub_core::types::TenantId;

use crate::error::AuthzError;
use crate::jwt::Claims;

/// The tenant boundary within which an actor's actions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveScope {
    /// Platform-level actor; no tenant boundary applies.
    Unrestricted,
    /// Actor is confined to a single tenant.
    Bound(TenantId),
}

impl EffectiveScope {
    /// The bound tenant, if any.
    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::Unrestricted => None,
            Self::Bound(id) => Some(*id),
        }
    }

    /// Whether this scope bypasses tenant comparisons.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }
}

/// Computes the effective tenant scope of a request.
///
/// - Platform admins resolve to [`EffectiveScope::Unrestricted`].
/// - Everyone else must carry a tenant in their claims
///   (`NoTenantAssigned` otherwise).
/// - A `requested_tenant` hint, when present, must equal the claimed
///   tenant for non-platform actors (`CrossTenantAccessDenied` otherwise).
///
/// Pure function: no side effects, no storage access.
pub fn resolve_scope(
    claims: &Claims,
    requested_tenant: Option<TenantId>,
) -> Result<EffectiveScope, AuthzError> {
    if claims.role.is_platform_admin() {
        return Ok(EffectiveScope::Unrestricted);
    }

    let tenant_id = claims.tenant_id.ok_or(AuthzError::NoTenantAssigned)?;

    if let Some(requested) = requested_tenant {
        if requested != tenant_id {
            return Err(AuthzError::CrossTenantAccessDenied);
        }
    }

    Ok(EffectiveScope::Bound(tenant_id))
}
