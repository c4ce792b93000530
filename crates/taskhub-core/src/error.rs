//! Unified application error types for TaskHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The [`ErrorKind`] is the stable
//! machine-readable reason code surfaced to clients; the message is the
//! human-readable half and is never meant to be matched on.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// Each variant renders as a stable SCREAMING_SNAKE code so that clients
/// can branch on cause without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found, or is invisible to the caller.
    NotFound,
    /// The credential signature did not verify.
    InvalidSignature,
    /// The credential has expired.
    Expired,
    /// The credential is structurally invalid or internally contradictory.
    Malformed,
    /// The caller does not have permission to perform the action.
    Unauthorized,
    /// The target resource belongs to a different tenant than the caller.
    TenantMismatch,
    /// A client-supplied tenant identifier disagreed with the verified claims.
    CrossTenantAccessDenied,
    /// An actor attempted to delete their own account.
    SelfDeletionForbidden,
    /// A tenant-scoped action was attempted by an actor with no tenant.
    NoTenantAssigned,
    /// The tenant is suspended and cannot perform actions.
    TenantSuspended,
    /// A per-tenant resource ceiling was reached.
    QuotaExceeded,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A transient storage fault; retryable at the reservation step only.
    TransientStorage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl ErrorKind {
    /// Transport status hint for the standard outcome mapping.
    ///
    /// Kept as a plain number so the core carries no HTTP framework
    /// dependency; the transport layer owns the actual response type.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidSignature | Self::Expired => 401,
            Self::Unauthorized
            | Self::TenantMismatch
            | Self::CrossTenantAccessDenied
            | Self::SelfDeletionForbidden
            | Self::NoTenantAssigned
            | Self::TenantSuspended
            | Self::QuotaExceeded
            | Self::Malformed => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Validation => 422,
            Self::TransientStorage => 503,
            Self::Configuration | Self::Serialization | Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Malformed => write!(f, "MALFORMED"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::TenantMismatch => write!(f, "TENANT_MISMATCH"),
            Self::CrossTenantAccessDenied => write!(f, "CROSS_TENANT_ACCESS_DENIED"),
            Self::SelfDeletionForbidden => write!(f, "SELF_DELETION_FORBIDDEN"),
            Self::NoTenantAssigned => write!(f, "NO_TENANT_ASSIGNED"),
            Self::TenantSuspended => write!(f, "TENANT_SUSPENDED"),
            Self::QuotaExceeded => write!(f, "QUOTA_EXCEEDED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::TransientStorage => write!(f, "TRANSIENT_STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout TaskHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error — also the machine-readable reason code.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a transient storage error.
    pub fn transient_storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransientStorage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error is worth retrying at the reservation step.
    pub fn is_transient(&self) -> bool {
        self.kind == ErrorKind::TransientStorage
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
