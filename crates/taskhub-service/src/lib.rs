//! # taskhub-service
//!
//! Business logic services for TaskHub. Each operation runs the full
//! authorization pipeline: validate credential → resolve tenant scope →
//! evaluate policy → reserve quota (for tenant-scoped creations) →
//! persist → emit audit. Any stage short-circuits with a typed
//! rejection.

pub mod access;
pub mod context;
pub mod project;
pub mod task;
pub mod user;

pub use access::{AccessGate, Actor};
pub use context::RequestContext;
pub use project::ProjectService;
pub use task::TaskService;
pub use user::UserService;
