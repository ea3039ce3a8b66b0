//! Application settings loading from config.toml and the environment.
//!
//! Every field has a default, so the bot runs without a config file at all. Values
//! from config.toml are then overridden by environment variables, which is how most
//! hosting platforms inject settings (notably `PORT`). The Discord token is deliberately
//! not part of [`AppConfig`]; it is read from the environment right before use.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Which persistence backend holds guild configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Flat JSON files in the data directory
    #[default]
    Json,
    /// `SQLite` database through `SeaORM`
    Sqlite,
    /// Process memory only, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config {
                message: format!(
                    "Unknown storage backend '{other}' (expected json, sqlite or memory)"
                ),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// `[storage]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection
    pub backend: StorageBackend,
    /// Directory holding the JSON files
    pub data_dir: PathBuf,
    /// `SQLite` URL for the sqlite backend
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: PathBuf::from("."),
            database_url: super::database::DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// `[health]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Whether to serve the liveness endpoint at all
    pub enabled: bool,
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// `[discord]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Register commands in this guild only (instant updates while developing)
    pub dev_guild_id: Option<u64>,
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Persistence settings
    pub storage: StorageConfig,
    /// Liveness endpoint settings
    pub health: HealthConfig,
    /// Discord client settings
    pub discord: DiscordConfig,
}

impl AppConfig {
    /// Applies environment overrides on top of the file values.
    ///
    /// `lookup` abstracts `std::env::var` so tests can supply variables without
    /// mutating the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Some(host) = lookup("HEALTH_HOST") {
            self.health.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.health.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT '{port}': {e}"),
            })?;
        }
        if let Some(guild) = lookup("DEV_GUILD_ID") {
            let guild = guild.trim();
            self.discord.dev_guild_id = if guild.is_empty() {
                None
            } else {
                Some(guild.parse().map_err(|e| Error::Config {
                    message: format!("Invalid DEV_GUILD_ID '{guild}': {e}"),
                })?)
            };
        }
        Ok(())
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file, falling back to defaults when the file is absent.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config file at {:?}, using defaults", path);
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {path:?}: {e}"),
        }),
    }
}

/// Loads config.toml (path from `CONFIG_PATH` or the default) and applies the
/// process environment on top.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    info!(
        "Configuration loaded: backend={}, health={}:{}",
        config.storage.backend, config.health.host, config.health.port
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [storage]
            backend = "sqlite"
            data_dir = "/var/lib/ticket-buddy"
            database_url = "sqlite://bot.sqlite?mode=rwc"

            [health]
            enabled = false
            port = 8080

            [discord]
            dev_guild_id = 123456789
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/ticket-buddy"));
        assert_eq!(config.storage.database_url, "sqlite://bot.sqlite?mode=rwc");
        assert!(!config.health.enabled);
        assert_eq!(config.health.port, 8080);
        assert_eq!(config.health.host, "0.0.0.0");
        assert_eq!(config.discord.dev_guild_id, Some(123_456_789));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.health.port, 5000);
        assert!(config.health.enabled);
        assert!(config.discord.dev_guild_id.is_none());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = parse_config("[storage]\nbackend = \"redis\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
        assert!("Redis".parse::<StorageBackend>().is_err());
        assert_eq!(" SQLite ".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "10000"),
            ("DATA_DIR", "/data"),
            ("DEV_GUILD_ID", "42"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.health.port, 10000);
        assert_eq!(config.storage.data_dir, PathBuf::from("/data"));
        assert_eq!(config.discord.dev_guild_id, Some(42));
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.health.port, 5000);
    }
}
