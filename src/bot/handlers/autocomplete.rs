//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::Context, core::category};

/// Provides autocomplete suggestions for the invoking guild's category names.
///
/// Returns up to 25 names containing the partial input (case-insensitive), in the
/// order the categories were created. Outside a guild, or if the store fails, there
/// are simply no suggestions.
pub async fn autocomplete_category_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };

    let Ok(categories) = ctx.data().store.categories(guild_id.get()).await else {
        return Vec::new();
    };

    category::matching_names(&categories, partial)
}
