//! Builders for interactive message components.
//!
//! Panel components are persistent: their custom IDs come from
//! [`ComponentAction`], so clicks are routed correctly after a restart.

use crate::{
    core::{
        category::{MAX_CATEGORIES, MAX_NAME_CHARS},
        ticket::{Access, ComponentAction, GrantTarget, TicketAccessPlan},
    },
    store::TicketCategory,
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Placeholder of the ticket panel select menu
pub const TICKET_SELECT_PLACEHOLDER: &str = "カテゴリーを選択してください";
/// Placeholder of the category deletion select menu
pub const DELETE_SELECT_PLACEHOLDER: &str = "削除するカテゴリーを選択";

/// Select menu options for `categories`; the option value is the category name.
///
/// Discord rejects menus with more than [`MAX_CATEGORIES`] options or labels longer
/// than [`MAX_NAME_CHARS`]. Stored data can exceed both (upgraded or hand-edited
/// files), so overlong names are skipped and the list is cut at the limit, with a
/// warning for whatever was dropped. Emoji that serenity cannot interpret are left off
/// rather than failing the panel.
#[must_use]
pub fn category_options(categories: &[TicketCategory]) -> Vec<serenity::CreateSelectMenuOption> {
    let (usable, overlong): (Vec<&TicketCategory>, Vec<&TicketCategory>) = categories
        .iter()
        .partition(|category| category.name.chars().count() <= MAX_NAME_CHARS);
    if !overlong.is_empty() {
        warn!(
            "Skipping {} categories with names over {} characters",
            overlong.len(),
            MAX_NAME_CHARS
        );
    }
    if usable.len() > MAX_CATEGORIES {
        warn!(
            "Showing the first {} of {} categories in select menu",
            MAX_CATEGORIES,
            usable.len()
        );
    }

    usable
        .into_iter()
        .take(MAX_CATEGORIES)
        .map(|category| {
            let option = serenity::CreateSelectMenuOption::new(&category.name, &category.name);
            match serenity::ReactionType::try_from(category.emoji.as_str()) {
                Ok(emoji) => option.emoji(emoji),
                Err(_) => option,
            }
        })
        .collect()
}

/// Single-choice category select with the given custom ID.
#[must_use]
pub fn category_select(
    custom_id: impl Into<String>,
    placeholder: &str,
    categories: &[TicketCategory],
) -> serenity::CreateActionRow {
    let menu = serenity::CreateSelectMenu::new(
        custom_id,
        serenity::CreateSelectMenuKind::String {
            options: category_options(categories),
        },
    )
    .placeholder(placeholder)
    .min_values(1)
    .max_values(1);
    serenity::CreateActionRow::SelectMenu(menu)
}

/// Persistent category select of a ticket panel.
#[must_use]
pub fn ticket_select(categories: &[TicketCategory]) -> serenity::CreateActionRow {
    category_select(
        ComponentAction::OpenTicket.custom_id(),
        TICKET_SELECT_PLACEHOLDER,
        categories,
    )
}

/// Delete button posted inside every ticket channel.
#[must_use]
pub fn close_ticket_row() -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(ComponentAction::CloseTicket.custom_id())
            .label("🗑️ チケットを削除")
            .style(serenity::ButtonStyle::Danger),
    ])
}

/// Self-assign button of a verify panel.
#[must_use]
pub fn role_button_row(role_id: serenity::RoleId) -> serenity::CreateActionRow {
    let action = ComponentAction::GrantRole {
        role_id: role_id.get(),
    };
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(action.custom_id())
            .label("ロールを取得")
            .style(serenity::ButtonStyle::Primary),
    ])
}

/// Serenity permission bits for an [`Access`] set.
#[must_use]
pub fn permissions(access: Access) -> serenity::Permissions {
    let mut bits = serenity::Permissions::empty();
    if access.view {
        bits |= serenity::Permissions::VIEW_CHANNEL;
    }
    if access.send {
        bits |= serenity::Permissions::SEND_MESSAGES;
    }
    if access.attach {
        bits |= serenity::Permissions::ATTACH_FILES;
    }
    bits
}

/// Channel overwrites implementing `plan`.
///
/// Targets with a zero ID cannot exist on Discord and are skipped.
#[must_use]
pub fn overwrites(plan: &TicketAccessPlan) -> Vec<serenity::PermissionOverwrite> {
    plan.grants
        .iter()
        .filter_map(|grant| {
            let kind = match grant.target {
                GrantTarget::Role(0) | GrantTarget::Member(0) => return None,
                GrantTarget::Role(id) => {
                    serenity::PermissionOverwriteType::Role(serenity::RoleId::new(id))
                }
                GrantTarget::Member(id) => {
                    serenity::PermissionOverwriteType::Member(serenity::UserId::new(id))
                }
            };
            Some(serenity::PermissionOverwrite {
                allow: permissions(grant.allow),
                deny: permissions(grant.deny),
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::Result,
        store::{GuildConfigStore, JsonStore},
    };

    #[test]
    fn test_permissions_mapping() {
        assert!(permissions(Access::NONE).is_empty());
        assert_eq!(
            permissions(Access::FULL),
            serenity::Permissions::VIEW_CHANNEL
                | serenity::Permissions::SEND_MESSAGES
                | serenity::Permissions::ATTACH_FILES
        );
    }

    #[test]
    fn test_overwrites_follow_plan() {
        let plan = TicketAccessPlan::build(1, 2, 3, &[4]);
        let overwrites = overwrites(&plan);
        assert_eq!(overwrites.len(), 4);

        assert_eq!(
            overwrites[0].kind,
            serenity::PermissionOverwriteType::Role(serenity::RoleId::new(1))
        );
        assert_eq!(overwrites[0].deny, serenity::Permissions::VIEW_CHANNEL);
        assert!(overwrites[0].allow.is_empty());

        assert_eq!(
            overwrites[1].kind,
            serenity::PermissionOverwriteType::Member(serenity::UserId::new(2))
        );
        assert!(overwrites[1].allow.attach_files());

        assert_eq!(
            overwrites[3].allow,
            serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES
        );
    }

    #[test]
    fn test_overwrites_skip_zero_ids() {
        let plan = TicketAccessPlan::build(1, 0, 3, &[]);
        assert_eq!(overwrites(&plan).len(), 2);
    }

    #[test]
    fn test_category_options_one_per_category() {
        let categories = vec![
            TicketCategory {
                id: 1,
                name: "Support".to_string(),
                emoji: "🛠️".to_string(),
            },
            TicketCategory {
                id: 2,
                name: "Report".to_string(),
                emoji: "🚨".to_string(),
            },
        ];
        assert_eq!(category_options(&categories).len(), 2);
    }

    fn numbered_categories(count: i64) -> Vec<TicketCategory> {
        (1..=count)
            .map(|id| TicketCategory {
                id,
                name: format!("category-{id}"),
                emoji: "📁".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_category_options_capped_at_menu_limit() {
        let categories = numbered_categories(30);
        assert_eq!(category_options(&categories).len(), MAX_CATEGORIES);
    }

    #[test]
    fn test_category_options_skip_overlong_names() {
        let mut categories = numbered_categories(3);
        categories[1].name = "x".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(category_options(&categories).len(), 2);

        // Exactly at the limit is still a valid label
        categories[1].name = "あ".repeat(MAX_NAME_CHARS);
        assert_eq!(category_options(&categories).len(), 3);
    }

    #[tokio::test]
    async fn test_upgraded_guild_map_fits_select_menu() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let entries: Vec<serde_json::Value> = (0..30)
            .map(|i| serde_json::json!({ "name": format!("legacy-{i}"), "emoji": "📁" }))
            .collect();
        tokio::fs::write(
            dir.path().join(crate::store::json::CATEGORIES_FILE),
            serde_json::json!({ "1": entries }).to_string(),
        )
        .await?;

        let store = JsonStore::open(dir.path()).await?;
        let categories = store.categories(1).await?;
        assert_eq!(categories.len(), 30);
        assert_eq!(category_options(&categories).len(), MAX_CATEGORIES);
        Ok(())
    }
}
