//! Entity module - SeaORM entity definitions for the `SQLite` backend.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod guild_setting;
pub mod ticket_category;

// Re-export specific types to avoid conflicts
pub use guild_setting::{
    Column as GuildSettingColumn, Entity as GuildSetting, Model as GuildSettingModel,
};
pub use ticket_category::{
    Column as TicketCategoryColumn, Entity as TicketCategory, Model as TicketCategoryModel,
};

/// Converts a Discord snowflake into the signed column representation.
///
/// Snowflakes fit in 63 bits today; the cast is a lossless bit reinterpretation either way.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn database_id_from_discord_id(discord_id: u64) -> i64 {
    discord_id as i64
}

/// Inverse of [`database_id_from_discord_id`].
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn discord_id_from_database_id(database_id: i64) -> u64 {
    database_id as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowflake_conversion_is_lossless() {
        let snowflake = 1_234_567_890_123_456_789_u64;
        assert_eq!(
            discord_id_from_database_id(database_id_from_discord_id(snowflake)),
            snowflake
        );
        assert_eq!(
            discord_id_from_database_id(database_id_from_discord_id(u64::MAX)),
            u64::MAX
        );
    }
}
