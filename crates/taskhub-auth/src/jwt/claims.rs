//! Decoded identity claims carried by every credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::types::{TenantId, UserId};
use taskhub_entity::user::Role;

/// Claims payload embedded in every signed credential.
///
/// Produced only by [`super::JwtDecoder`] from a verified token;
/// immutable for the lifetime of one request and never mutated by
/// downstream components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the acting user's ID.
    pub sub: UserId,
    /// Tenant context; `None` for platform admins, always set otherwise.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    /// Role at the time of issuance.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Credential ID for traceability.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the acting user's ID.
    pub fn actor_id(&self) -> UserId {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Whether the role/tenant pairing is internally consistent.
    ///
    /// A platform admin bound to a tenant is a contradiction; it is
    /// rejected at validation and never reaches policy evaluation.
    pub fn is_consistent(&self) -> bool {
        if self.role.is_platform_admin() {
            self.tenant_id.is_none()
        } else {
            true
        }
    }
}
