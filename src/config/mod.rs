/// `SQLite` connection management and table creation
pub mod database;

/// Application settings from config.toml and the environment
pub mod settings;

pub use settings::{
    AppConfig, DiscordConfig, HealthConfig, StorageBackend, StorageConfig, load_app_configuration,
};
