//! # configs
//!
//! Layered settings for the forum binary.
//!
//! # Loading Order
//! 1. Built-in defaults
//! 2. TOML file at `$FORUM_CONFIG` (default `config/forum.toml`, optional)
//! 3. Environment variables `FORUM_<SECTION>__<KEY>` (e.g. `FORUM_SERVER__PORT=8080`)
//! 4. `DATABASE_URL`, only when `database.url` is still unset

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/forum.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("database.url is required when database.backend is \"postgres\"")]
    MissingDatabaseUrl,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Upper bound for JSON request bodies
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub backend: StoreBackend,
    #[serde(default)]
    pub url: Option<SecretString>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Settings {
    /// Loads settings from every source, `.env` included.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var("FORUM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        debug!(path = %path, "loading configuration");

        let mut settings: Settings = defaults()?
            .add_source(File::new(&path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("FORUM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if settings.database.url.is_none() {
            settings.database.url = std::env::var("DATABASE_URL").ok().map(SecretString::from);
        }
        settings.validate()
    }

    /// Defaults overlaid with a TOML document; no environment lookups.
    pub fn from_toml(toml: &str) -> Result<Self, SettingsError> {
        let settings: Settings = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.database.backend == StoreBackend::Postgres {
            let has_url = self
                .database
                .url
                .as_ref()
                .is_some_and(|url| !url.expose_secret().trim().is_empty());
            if !has_url {
                return Err(SettingsError::MissingDatabaseUrl);
            }
        }
        Ok(self)
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.max_body_bytes", 64 * 1024)?
        .set_default("database.backend", "memory")?
        .set_default("database.max_connections", 5)?
        .set_default("log.format", "pretty")?
        .set_default("log.filter", "info")
}
