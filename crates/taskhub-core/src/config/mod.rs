//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod audit;
pub mod auth;
pub mod logging;
pub mod policy;
pub mod quota;

use serde::{Deserialize, Serialize};

pub use self::audit::AuditConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::policy::{PolicyConfig, TaskUpdateRule};
pub use self::quota::QuotaConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Authorization policy settings.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Quota reservation settings.
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Audit emission settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `TASKHUB`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TASKHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
