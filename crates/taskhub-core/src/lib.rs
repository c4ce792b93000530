//! # taskhub-core
//!
//! Core traits, configuration, types, and error handling shared by every
//! TaskHub crate.
//!
//! ## Modules
//!
//! - `config` — TOML/env configuration schemas
//! - `error` — unified [`AppError`] and machine-readable [`ErrorKind`] codes
//! - `telemetry` — tracing initialization
//! - `traits` — collaborator traits owned by the core (quota ledger)
//! - `types` — newtype IDs and resource kinds

pub mod config;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
