//! Collaborator traits owned by the core.

pub mod quota;

pub use quota::{QuotaLedger, UsageSnapshot};
