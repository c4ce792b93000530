//! # taskhub-store
//!
//! Storage collaborator traits for TaskHub plus in-memory reference
//! implementations. The authorization core depends only on the traits;
//! the lifecycle of concrete stores is owned by the composition root.

pub mod memory;
pub mod traits;

pub use traits::{AuditSink, ProjectStore, TaskStore, TenantStore, UserStore};
