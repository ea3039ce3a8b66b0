//! Ticket category entity - the options offered by a guild's ticket panel.
//!
//! Each category has a display name and an emoji. Names are unique within a guild;
//! the autoincrement primary key doubles as the stable category identifier.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ticket category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_categories")]
pub struct Model {
    /// Unique identifier for the category, never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild ID, stored bit-for-bit as a signed integer
    pub guild_id: i64,
    /// Label shown in the ticket select menu (e.g., "Support")
    pub name: String,
    /// Emoji shown next to the label, unicode or `<:name:id>`
    pub emoji: String,
    /// When the category was created
    pub created_at: DateTime,
}

/// `TicketCategory` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
