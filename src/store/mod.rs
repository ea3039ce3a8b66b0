//! Guild configuration store.
//!
//! Command handlers never touch files or tables directly; they go through
//! [`GuildConfigStore`], which is injected into the bot context as a trait object.
//! Three backends implement it: flat JSON files, `SQLite` via `SeaORM`, and an
//! in-memory map used by tests and throwaway deployments.

/// Flat-file backend with versioned document upgrades
pub mod json;
/// In-process backend
pub mod memory;
/// `SeaORM` backend
pub mod sqlite;

pub use crate::config::StorageBackend;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::{config::StorageConfig, errors::Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// A ticket category as offered by a guild's ticket panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCategory {
    /// Store-wide unique identifier, never reused after deletion
    pub id: i64,
    /// Select option label; unique within the guild
    pub name: String,
    /// Emoji rendered beside the label
    pub emoji: String,
}

/// Outcome of [`GuildConfigStore::upsert_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryUpsert {
    /// No category had this name; a new one was appended
    Created(TicketCategory),
    /// An existing category's emoji was replaced in place
    Updated(TicketCategory),
}

impl CategoryUpsert {
    /// The category as stored after the operation.
    #[must_use]
    pub const fn category(&self) -> &TicketCategory {
        match self {
            Self::Created(category) | Self::Updated(category) => category,
        }
    }
}

/// Per-guild configuration persistence.
///
/// Implementations must be safe to share across the command tasks serenity spawns.
#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    /// Channel that receives achievement posts, if one was configured.
    async fn announcement_channel(&self, guild_id: u64) -> Result<Option<u64>>;

    /// Sets (or replaces) the achievement channel for a guild.
    async fn set_announcement_channel(&self, guild_id: u64, channel_id: u64) -> Result<()>;

    /// All categories of a guild in insertion order; empty for unknown guilds.
    async fn categories(&self, guild_id: u64) -> Result<Vec<TicketCategory>>;

    /// Replaces the emoji of the category named `name`, or appends a new category.
    async fn upsert_category(&self, guild_id: u64, name: &str, emoji: &str)
    -> Result<CategoryUpsert>;

    /// Removes every category named `name`; returns whether anything was removed.
    async fn delete_category(&self, guild_id: u64, name: &str) -> Result<bool>;
}

/// Upsert over an in-memory category list, shared by the map-based backends.
///
/// `next_id` is the backend's monotonic counter and is only advanced on insert.
pub(crate) fn upsert_into(
    categories: &mut Vec<TicketCategory>,
    next_id: &mut i64,
    name: &str,
    emoji: &str,
) -> CategoryUpsert {
    if let Some(existing) = categories.iter_mut().find(|c| c.name == name) {
        existing.emoji = emoji.to_string();
        return CategoryUpsert::Updated(existing.clone());
    }

    let category = TicketCategory {
        id: *next_id,
        name: name.to_string(),
        emoji: emoji.to_string(),
    };
    *next_id += 1;
    categories.push(category.clone());
    CategoryUpsert::Created(category)
}

/// Removes all categories named `name`; returns whether the list changed.
pub(crate) fn remove_from(categories: &mut Vec<TicketCategory>, name: &str) -> bool {
    let before = categories.len();
    categories.retain(|c| c.name != name);
    categories.len() != before
}

/// Opens the backend selected in `config`.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn GuildConfigStore>> {
    let store: Arc<dyn GuildConfigStore> = match config.backend {
        StorageBackend::Json => {
            info!("Using JSON storage in {:?}", config.data_dir);
            Arc::new(JsonStore::open(&config.data_dir).await?)
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at {}", config.database_url);
            Arc::new(SqliteStore::connect(&config.database_url).await?)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; configuration will not survive restarts");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_sqlite_store;

    /// Identifier rules every backend must follow: upserts keep the id and position,
    /// and ids are never handed out twice, even after the highest one is deleted.
    async fn check_category_ids(store: &dyn GuildConfigStore) -> Result<()> {
        let a = store.upsert_category(1, "A", "🅰️").await?;
        let b = store.upsert_category(1, "B", "🅱️").await?;
        assert!(b.category().id > a.category().id);

        let a_again = store.upsert_category(1, "A", "🔤").await?;
        assert!(matches!(a_again, CategoryUpsert::Updated(_)));
        assert_eq!(a_again.category().id, a.category().id);
        let names: Vec<String> = store
            .categories(1)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);

        assert!(store.delete_category(1, "B").await?);
        let c = store.upsert_category(1, "C", "©️").await?;
        assert!(c.category().id > b.category().id, "id {} reused", b.category().id);

        assert!(store.delete_category(1, "C").await?);
        let d = store.upsert_category(2, "D", "🇩").await?;
        assert!(d.category().id > c.category().id, "id {} reused", c.category().id);
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_category_ids() -> Result<()> {
        check_category_ids(&MemoryStore::new()).await
    }

    #[tokio::test]
    async fn test_json_store_category_ids() -> Result<()> {
        let dir = tempfile::tempdir()?;
        check_category_ids(&JsonStore::open(dir.path()).await?).await
    }

    #[tokio::test]
    async fn test_sqlite_store_category_ids() -> Result<()> {
        check_category_ids(&setup_sqlite_store().await?).await
    }

    #[tokio::test]
    async fn test_open_memory_store() -> Result<()> {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let store = open_store(&config).await?;
        assert!(store.categories(1).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_open_json_store_in_temp_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = StorageConfig {
            backend: StorageBackend::Json,
            data_dir: dir.path().to_path_buf(),
            ..StorageConfig::default()
        };
        let store = open_store(&config).await?;
        store.set_announcement_channel(1, 2).await?;
        assert_eq!(store.announcement_channel(1).await?, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_open_sqlite_store_in_memory() -> Result<()> {
        let config = StorageConfig {
            backend: StorageBackend::Sqlite,
            database_url: "sqlite::memory:".to_string(),
            ..StorageConfig::default()
        };
        let store = open_store(&config).await?;
        store.upsert_category(1, "Support", "🛠️").await?;
        assert_eq!(store.categories(1).await?.len(), 1);
        Ok(())
    }
}
