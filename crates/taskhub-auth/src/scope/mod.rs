//! Tenant scope resolution.

pub mod resolver;

pub use resolver::{EffectiveScope, resolve_scope};
