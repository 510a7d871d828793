//! # Settings
//!
//! Layered configuration, weakest to strongest:
//! 1. built-in defaults
//! 2. `config/default.toml`
//! 3. `config/{APP_ENV}.toml` (APP_ENV defaults to `dev`)
//! 4. environment variables, e.g. `MESSAGEBOARD__SERVER__PORT=8080`
//!
//! The binary reads `.env` before calling [`Settings::load`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("storage.database_url is required when storage.backend = \"postgres\"")]
    MissingDatabaseUrl,

    #[error("storage.backend = \"postgres\" but this build lacks the db-postgres feature")]
    PostgresUnavailable,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Only read when `backend` is postgres. Never logged.
    #[serde(default)]
    pub database_url: Option<SecretString>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                Environment::with_prefix("MESSAGEBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    /// Loads from a TOML string on top of the defaults (useful for testing).
    pub fn from_toml(toml: &str) -> Result<Self, SettingsError> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("storage.backend", "memory")?
            .set_default("storage.max_connections", 5)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.storage.backend == StorageBackend::Postgres {
            if !cfg!(feature = "db-postgres") {
                return Err(SettingsError::PostgresUnavailable);
            }
            if self.storage.database_url.is_none() {
                return Err(SettingsError::MissingDatabaseUrl);
            }
        }
        Ok(())
    }
}
