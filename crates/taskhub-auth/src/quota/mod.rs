//! Quota enforcement: atomic reserve, commit, and compensating release.

pub mod enforcer;
pub mod memory;

pub use enforcer::{QuotaEnforcer, QuotaReservation};
pub use memory::MemoryQuotaLedger;
