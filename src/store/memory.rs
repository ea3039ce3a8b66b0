//! In-memory [`GuildConfigStore`].

use super::{CategoryUpsert, GuildConfigStore, TicketCategory, remove_from, upsert_into};
use crate::errors::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct State {
    channels: HashMap<u64, u64>,
    categories: HashMap<u64, Vec<TicketCategory>>,
    next_id: i64,
}

/// Keeps everything in process memory. Used as the test fake and for `backend = "memory"`.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                channels: HashMap::new(),
                categories: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GuildConfigStore for MemoryStore {
    async fn announcement_channel(&self, guild_id: u64) -> Result<Option<u64>> {
        Ok(self.state.read().await.channels.get(&guild_id).copied())
    }

    async fn set_announcement_channel(&self, guild_id: u64, channel_id: u64) -> Result<()> {
        self.state.write().await.channels.insert(guild_id, channel_id);
        Ok(())
    }

    async fn categories(&self, guild_id: u64) -> Result<Vec<TicketCategory>> {
        Ok(self
            .state
            .read()
            .await
            .categories
            .get(&guild_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_category(
        &self,
        guild_id: u64,
        name: &str,
        emoji: &str,
    ) -> Result<CategoryUpsert> {
        let mut state = self.state.write().await;
        let State {
            categories,
            next_id,
            ..
        } = &mut *state;
        let list = categories.entry(guild_id).or_default();
        Ok(upsert_into(list, next_id, name, emoji))
    }

    async fn delete_category(&self, guild_id: u64, name: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .categories
            .get_mut(&guild_id)
            .is_some_and(|list| remove_from(list, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_announcement_channel_overwrite() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.announcement_channel(10).await?, None);

        store.set_announcement_channel(10, 100).await?;
        store.set_announcement_channel(10, 200).await?;
        assert_eq!(store.announcement_channel(10).await?, Some(200));
        assert_eq!(store.announcement_channel(11).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_keeps_position_and_id() -> Result<()> {
        let store = MemoryStore::new();
        let first = store.upsert_category(1, "Support", "🛠️").await?;
        store.upsert_category(1, "Report", "🚨").await?;
        let updated = store.upsert_category(1, "Support", "❓").await?;

        assert!(matches!(first, CategoryUpsert::Created(_)));
        assert!(matches!(updated, CategoryUpsert::Updated(_)));
        assert_eq!(first.category().id, updated.category().id);

        let categories = store.categories(1).await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Support");
        assert_eq!(categories[0].emoji, "❓");
        assert_eq!(categories[1].name, "Report");
        Ok(())
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() -> Result<()> {
        let store = MemoryStore::new();
        let a = store.upsert_category(1, "A", "🅰️").await?;
        let b = store.upsert_category(1, "B", "🅱️").await?;
        assert!(store.delete_category(1, "B").await?);
        let c = store.upsert_category(1, "C", "©️").await?;

        assert_ne!(c.category().id, b.category().id);
        assert!(c.category().id > a.category().id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_an_error() -> Result<()> {
        let store = MemoryStore::new();
        assert!(!store.delete_category(99, "Nothing").await?);
        store.upsert_category(1, "Support", "🛠️").await?;
        assert!(!store.delete_category(1, "Other").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_guilds_are_isolated() -> Result<()> {
        let store = MemoryStore::new();
        store.upsert_category(1, "Support", "🛠️").await?;
        store.upsert_category(2, "Support", "🆘").await?;

        assert!(store.delete_category(1, "Support").await?);
        assert!(store.categories(1).await?.is_empty());
        assert_eq!(store.categories(2).await?[0].emoji, "🆘");
        Ok(())
    }
}
