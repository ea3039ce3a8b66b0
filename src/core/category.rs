//! Ticket category business logic.
//!
//! Validation and limits that hold regardless of backend. The limits mirror what a
//! Discord select menu can display: at most 25 options, labels up to 100 characters.

use crate::{
    errors::{Error, Result},
    store::{CategoryUpsert, GuildConfigStore, TicketCategory},
};
use tracing::info;

/// Maximum categories per guild (select menu option limit)
pub const MAX_CATEGORIES: usize = 25;
/// Maximum category name length in characters (select option label limit)
pub const MAX_NAME_CHARS: usize = 100;
/// Maximum emoji argument length; custom emoji look like `<a:name:id>`
pub const MAX_EMOJI_CHARS: usize = 64;

/// Checks a category name and emoji, returning the trimmed pair.
pub fn validate_category<'a>(name: &'a str, emoji: &'a str) -> Result<(&'a str, &'a str)> {
    let name = name.trim();
    let emoji = emoji.trim();

    if name.is_empty() {
        return Err(Error::InvalidCategory {
            message: "name cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(Error::InvalidCategory {
            message: format!("name must be at most {MAX_NAME_CHARS} characters"),
        });
    }
    if emoji.is_empty() {
        return Err(Error::InvalidCategory {
            message: "emoji cannot be empty".to_string(),
        });
    }
    if emoji.chars().count() > MAX_EMOJI_CHARS {
        return Err(Error::InvalidCategory {
            message: format!("emoji must be at most {MAX_EMOJI_CHARS} characters"),
        });
    }

    Ok((name, emoji))
}

/// Creates a category or updates the emoji of an existing one with the same name.
///
/// The per-guild limit only applies to new names; updating an existing category is
/// always allowed.
pub async fn save_category(
    store: &dyn GuildConfigStore,
    guild_id: u64,
    name: &str,
    emoji: &str,
) -> Result<CategoryUpsert> {
    let (name, emoji) = validate_category(name, emoji)?;

    let existing = store.categories(guild_id).await?;
    let is_new = !existing.iter().any(|c| c.name == name);
    if is_new && existing.len() >= MAX_CATEGORIES {
        return Err(Error::CategoryLimit {
            limit: MAX_CATEGORIES,
        });
    }

    let outcome = store.upsert_category(guild_id, name, emoji).await?;
    info!(
        "Category '{}' {} in guild {}",
        name,
        if is_new { "created" } else { "updated" },
        guild_id
    );
    Ok(outcome)
}

/// Deletes the category named `name`, failing with [`Error::CategoryNotFound`] if absent.
pub async fn remove_category(
    store: &dyn GuildConfigStore,
    guild_id: u64,
    name: &str,
) -> Result<()> {
    if store.delete_category(guild_id, name).await? {
        info!("Category '{}' deleted in guild {}", name, guild_id);
        Ok(())
    } else {
        Err(Error::CategoryNotFound {
            name: name.to_string(),
        })
    }
}

/// Category names containing `partial` (case-insensitive), for autocomplete.
#[must_use]
pub fn matching_names(categories: &[TicketCategory], partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    categories
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&partial_lower))
        .map(|c| c.name.clone())
        .take(MAX_CATEGORIES)
        .collect()
}
