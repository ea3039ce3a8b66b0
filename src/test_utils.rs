//! Shared test utilities for ticket-buddy.
//!
//! Helpers for setting up stores with sensible defaults and deterministic randomness.

use crate::{
    errors::Result,
    store::{GuildConfigStore, MemoryStore, SqliteStore},
};
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::DatabaseConnection;

/// Guild ID used throughout the tests
pub const TEST_GUILD_ID: u64 = 900_000_000_000_000_001;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a [`SqliteStore`] over a fresh in-memory database.
pub async fn setup_sqlite_store() -> Result<SqliteStore> {
    SqliteStore::from_connection(setup_test_db().await?).await
}

/// Creates a [`MemoryStore`] whose [`TEST_GUILD_ID`] guild has the given categories.
pub async fn store_with_categories(categories: &[(&str, &str)]) -> Result<MemoryStore> {
    let store = MemoryStore::new();
    for (name, emoji) in categories {
        store.upsert_category(TEST_GUILD_ID, name, emoji).await?;
    }
    Ok(store)
}

/// Deterministic RNG for functions that take `&mut impl Rng`.
#[must_use]
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}
