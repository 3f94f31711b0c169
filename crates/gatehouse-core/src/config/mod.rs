//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered TOML files and environment variables. Each sub-module represents
//! a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variables read on top of every other source.
///
/// These are the plain deployment variables (`DB_HOST`, `SECRET_KEY`, ...)
/// that existing `.env` files already provide.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_NAME", "database.name"),
    ("DB_PASSWORD", "database.password"),
    ("SECRET_KEY", "auth.jwt_secret"),
];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token, cookie, and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// User store backend selection.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which user store implementation backs the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local map. Data is lost on restart.
    Memory,
}

/// User store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StoreBackend,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, `GATEHOUSE__*` variables, then the plain
    /// deployment variables listed in [`LEGACY_ENV_KEYS`].
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                Environment::with_prefix("GATEHOUSE")
                    .separator("__")
                    .try_parsing(true),
            );

        let builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;
        let config = Self::from_builder(builder)?;
        config.validate()?;
        Ok(config)
    }

    /// Build and deserialize a prepared configuration builder.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()
    }
}

/// Overlay the plain deployment variables onto the builder.
///
/// `lookup` is injected so tests do not have to mutate the process
/// environment.
pub fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(*key, lookup(var))?;
    }
    Ok(builder)
}
