//! Database configuration module for the `SQLite` storage backend.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are generated
//! from the entity definitions with `Schema::create_table_from_entity`, guarded with
//! `IF NOT EXISTS` so startup is idempotent against an existing database file.

use crate::entities::{GuildSetting, TicketCategory};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::PathBuf;
use tracing::debug;

/// Database URL used when neither config.toml nor `DATABASE_URL` provide one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/ticket_buddy.sqlite?mode=rwc";

/// Extracts the on-disk path from a `SQLite` URL, or `None` for in-memory databases.
#[must_use]
pub fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Establishes a connection to the `SQLite` database at `database_url`.
///
/// The parent directory of a file-backed database is created first, since `SQLite`
/// will create the file but not missing directories.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .as_deref()
        .and_then(std::path::Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
    {
        debug!("Ensuring database directory {:?} exists", parent);
        tokio::fs::create_dir_all(parent).await?;
    }

    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the guild settings and ticket category tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut guild_setting_table = schema.create_table_from_entity(GuildSetting);
    guild_setting_table.if_not_exists();
    let mut ticket_category_table = schema.create_table_from_entity(TicketCategory);
    ticket_category_table.if_not_exists();

    db.execute(builder.build(&guild_setting_table)).await?;
    db.execute(builder.build(&ticket_category_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{GuildSettingModel, TicketCategoryModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<GuildSettingModel> = GuildSetting::find().limit(1).all(&db).await?;
        let _: Vec<TicketCategoryModel> = TicketCategory::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite://data/bot.sqlite?mode=rwc"),
            Some(PathBuf::from("data/bot.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:bot.db"),
            Some(PathBuf::from("bot.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }
}
