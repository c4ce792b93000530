//! Stage-typed errors for the authorization pipeline.
//!
//! Each pipeline stage rejects with its own error enum; the composition
//! layer maps them into [`AppError`] for the application boundary.

use thiserror::Error;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::types::ResourceKind;

/// Rejections produced by credential validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The signature did not verify against the configured key.
    #[error("credential signature is invalid")]
    InvalidSignature,

    /// The credential's validity window has elapsed.
    #[error("credential has expired")]
    Expired,

    /// The credential is structurally invalid or internally contradictory.
    #[error("credential is malformed: {0}")]
    Malformed(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = match &err {
            AuthError::InvalidSignature => ErrorKind::InvalidSignature,
            AuthError::Expired => ErrorKind::Expired,
            AuthError::Malformed(_) => ErrorKind::Malformed,
        };
        AppError::new(kind, err.to_string())
    }
}

/// Rejections produced by scope resolution and policy evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No rule in the decision table permits the action.
    #[error("not authorized to perform '{0}'")]
    Unauthorized(String),

    /// The target resource belongs to a different tenant.
    #[error("target resource belongs to a different tenant")]
    TenantMismatch,

    /// A client-supplied tenant identifier disagreed with the claims.
    #[error("requested tenant does not match the authenticated tenant")]
    CrossTenantAccessDenied,

    /// An actor attempted to delete their own account.
    #[error("actors may not delete their own account")]
    SelfDeletionForbidden,

    /// A tenant-scoped action was attempted by a tenant-less actor.
    #[error("actor is not assigned to any tenant")]
    NoTenantAssigned,

    /// The tenant is suspended.
    #[error("tenant is suspended")]
    TenantSuspended,
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        let kind = match &err {
            AuthzError::Unauthorized(_) => ErrorKind::Unauthorized,
            AuthzError::TenantMismatch => ErrorKind::TenantMismatch,
            AuthzError::CrossTenantAccessDenied => ErrorKind::CrossTenantAccessDenied,
            AuthzError::SelfDeletionForbidden => ErrorKind::SelfDeletionForbidden,
            AuthzError::NoTenantAssigned => ErrorKind::NoTenantAssigned,
            AuthzError::TenantSuspended => ErrorKind::TenantSuspended,
        };
        AppError::new(kind, err.to_string())
    }
}

/// Rejections produced by quota reservation.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// The tenant's ceiling for this resource kind is already reached.
    #[error("tenant quota for {kind} reached (ceiling {ceiling})")]
    Exceeded {
        /// The governed resource kind.
        kind: ResourceKind,
        /// The ceiling in force at denial time.
        ceiling: u32,
    },

    /// The ledger could not be read or written; the reservation fails
    /// closed.
    #[error("quota reservation failed")]
    Storage(#[source] AppError),
}

impl From<QuotaError> for AppError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Exceeded { kind, ceiling } => AppError::new(
                ErrorKind::QuotaExceeded,
                format!("tenant quota for {kind} reached (ceiling {ceiling})"),
            ),
            QuotaError::Storage(inner) => inner,
        }
    }
}
