//! Audit entity.

pub mod model;

pub use model::{AuditEntry, AuditOutcome, NewAuditEntry};
