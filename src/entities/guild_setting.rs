//! Guild setting entity - key-value pairs scoped to a single guild.
//!
//! Used for per-guild configuration such as the achievement announcement channel.
//! One row per `(guild_id, key)`; uniqueness is maintained by the store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Guild setting database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord guild ID, stored bit-for-bit as a signed integer
    pub guild_id: i64,
    /// Setting key (e.g., `"achievement_channel"`)
    pub key: String,
    /// Setting value stored as string
    pub value: String,
    /// When this setting was last modified
    pub updated_at: DateTime,
}

/// `GuildSetting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
