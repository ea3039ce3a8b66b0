//! `SQLite` [`GuildConfigStore`] backed by `SeaORM`.
//!
//! The announcement channel is a row in the `guild_settings` key-value table; categories
//! live in `ticket_categories`, whose autoincrement key provides the category IDs.

use super::{CategoryUpsert, GuildConfigStore, TicketCategory};
use crate::{
    config::database,
    entities::{
        GuildSetting, TicketCategory as TicketCategoryEntity, database_id_from_discord_id,
        guild_setting, ticket_category,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::debug;

const ACHIEVEMENT_CHANNEL_KEY: &str = "achievement_channel";

impl From<ticket_category::Model> for TicketCategory {
    fn from(model: ticket_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            emoji: model.emoji,
        }
    }
}

/// Guild configuration in a `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Connects to `database_url` and creates missing tables.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = database::create_connection(database_url).await?;
        Self::from_connection(db).await
    }

    /// Wraps an existing connection, creating missing tables.
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        database::create_tables(&db).await?;
        Ok(Self { db })
    }

    async fn setting<C>(db: &C, guild_id: i64, key: &str) -> Result<Option<guild_setting::Model>>
    where
        C: ConnectionTrait,
    {
        GuildSetting::find()
            .filter(guild_setting::Column::GuildId.eq(guild_id))
            .filter(guild_setting::Column::Key.eq(key))
            .one(db)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl GuildConfigStore for SqliteStore {
    async fn announcement_channel(&self, guild_id: u64) -> Result<Option<u64>> {
        let guild_id = database_id_from_discord_id(guild_id);
        let Some(setting) = Self::setting(&self.db, guild_id, ACHIEVEMENT_CHANNEL_KEY).await?
        else {
            return Ok(None);
        };

        setting
            .value
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::Config {
                message: format!(
                    "Stored achievement channel '{}' for guild {guild_id} is not an ID: {e}",
                    setting.value
                ),
            })
    }

    async fn set_announcement_channel(&self, guild_id: u64, channel_id: u64) -> Result<()> {
        let db_guild_id = database_id_from_discord_id(guild_id);
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        if let Some(existing) = Self::setting(&txn, db_guild_id, ACHIEVEMENT_CHANNEL_KEY).await? {
            let mut active_model: guild_setting::ActiveModel = existing.into();
            active_model.value = Set(channel_id.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&txn).await?;
        } else {
            let new_setting = guild_setting::ActiveModel {
                guild_id: Set(db_guild_id),
                key: Set(ACHIEVEMENT_CHANNEL_KEY.to_string()),
                value: Set(channel_id.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_setting.insert(&txn).await?;
        }

        txn.commit().await?;
        debug!("Achievement channel for guild {} set to {}", guild_id, channel_id);
        Ok(())
    }

    async fn categories(&self, guild_id: u64) -> Result<Vec<TicketCategory>> {
        let categories = TicketCategoryEntity::find()
            .filter(ticket_category::Column::GuildId.eq(database_id_from_discord_id(guild_id)))
            .order_by_asc(ticket_category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    async fn upsert_category(
        &self,
        guild_id: u64,
        name: &str,
        emoji: &str,
    ) -> Result<CategoryUpsert> {
        let db_guild_id = database_id_from_discord_id(guild_id);
        let txn = self.db.begin().await?;

        let existing = TicketCategoryEntity::find()
            .filter(ticket_category::Column::GuildId.eq(db_guild_id))
            .filter(ticket_category::Column::Name.eq(name))
            .order_by_asc(ticket_category::Column::Id)
            .one(&txn)
            .await?;

        let outcome = if let Some(existing) = existing {
            let mut active_model: ticket_category::ActiveModel = existing.into();
            active_model.emoji = Set(emoji.to_string());
            CategoryUpsert::Updated(active_model.update(&txn).await?.into())
        } else {
            let new_category = ticket_category::ActiveModel {
                guild_id: Set(db_guild_id),
                name: Set(name.to_string()),
                emoji: Set(emoji.to_string()),
                created_at: Set(Utc::now().naive_utc()),
                ..Default::default()
            };
            CategoryUpsert::Created(new_category.insert(&txn).await?.into())
        };

        txn.commit().await?;
        Ok(outcome)
    }

    async fn delete_category(&self, guild_id: u64, name: &str) -> Result<bool> {
        let result = TicketCategoryEntity::delete_many()
            .filter(ticket_category::Column::GuildId.eq(database_id_from_discord_id(guild_id)))
            .filter(ticket_category::Column::Name.eq(name))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_sqlite_store;

    #[tokio::test]
    async fn test_announcement_channel_roundtrip() -> Result<()> {
        let store = setup_sqlite_store().await?;
        assert_eq!(store.announcement_channel(1).await?, None);

        store.set_announcement_channel(1, 10).await?;
        store.set_announcement_channel(1, 20).await?;
        assert_eq!(store.announcement_channel(1).await?, Some(20));

        // Exactly one row per guild and key
        let rows = GuildSetting::find().all(&store.db).await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_large_snowflakes_survive() -> Result<()> {
        let store = setup_sqlite_store().await?;
        let guild = 1_100_000_000_000_000_000_u64;
        let channel = u64::MAX - 1;
        store.set_announcement_channel(guild, channel).await?;
        assert_eq!(store.announcement_channel(guild).await?, Some(channel));

        store.upsert_category(guild, "Support", "🛠️").await?;
        assert_eq!(store.categories(guild).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_and_delete_categories() -> Result<()> {
        let store = setup_sqlite_store().await?;

        let created = store.upsert_category(7, "Support", "🛠️").await?;
        store.upsert_category(7, "Report", "🚨").await?;
        let updated = store.upsert_category(7, "Support", "❓").await?;
        assert!(matches!(created, CategoryUpsert::Created(_)));
        assert!(matches!(updated, CategoryUpsert::Updated(_)));
        assert_eq!(created.category().id, updated.category().id);

        let categories = store.categories(7).await?;
        assert_eq!(
            categories
                .iter()
                .map(|c| (c.name.as_str(), c.emoji.as_str()))
                .collect::<Vec<_>>(),
            vec![("Support", "❓"), ("Report", "🚨")]
        );

        assert!(store.delete_category(7, "Support").await?);
        assert!(!store.delete_category(7, "Support").await?);
        assert!(store.categories(8).await?.is_empty());
        Ok(())
    }
}
