//! Achievement announcement logic.
//!
//! An achievement post records who did something, what they did, a comment and a
//! 1–5 rating. Posts go to the guild's configured announcement channel.

use crate::{
    errors::{Error, Result},
    store::GuildConfigStore,
};

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;
/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// Title of the embed posted for each achievement
pub const ACHIEVEMENT_EMBED_TITLE: &str = "🎉 新しい実績";

/// Title of the fill-in template panel
pub const PANEL_TITLE: &str = "🎖️ 実績パネル";

/// Body of the fill-in template panel
pub const PANEL_TEMPLATE: &str = "以下のテンプレートをコピーしてメッセージ編集で記入してください。\n\n\
```\n\
【記入者】<@ユーザーID>\n\
【実績内容】ここに実績内容を入力\n\
【コメント】ここにコメントを入力\n\
【評価】1〜5\n\
```\n";

/// Footer of the fill-in template panel
pub const PANEL_FOOTER: &str = "必要に応じてメッセージを編集してください。";

/// A validated achievement ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementRecord {
    /// Numeric Discord ID of the person being recorded
    pub user_id: String,
    /// What was achieved
    pub achievement: String,
    /// Free-form comment
    pub comment: String,
    /// Rating in `MIN_RATING..=MAX_RATING`
    pub rating: i64,
}

impl AchievementRecord {
    /// Validates the raw command arguments.
    ///
    /// `user_id` must be non-empty ASCII digits (surrounding whitespace is ignored) and
    /// `rating` must lie within `MIN_RATING..=MAX_RATING`.
    pub fn new(user_id: &str, achievement: &str, comment: &str, rating: i64) -> Result<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() || !user_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidUserId {
                value: user_id.to_string(),
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::InvalidRating { rating });
        }

        Ok(Self {
            user_id: user_id.to_string(),
            achievement: achievement.to_string(),
            comment: comment.to_string(),
            rating,
        })
    }

    /// Embed fields in display order as `(name, value)` pairs.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("記入者ID", self.user_id.clone()),
            ("内容", self.achievement.clone()),
            ("コメント", self.comment.clone()),
            ("評価", format!("{}/{MAX_RATING}", self.rating)),
        ]
    }
}

/// Looks up the announcement channel, failing with
/// [`Error::AnnouncementChannelNotSet`] when the guild has none.
pub async fn resolve_announcement_channel(
    store: &dyn GuildConfigStore,
    guild_id: u64,
) -> Result<u64> {
    store
        .announcement_channel(guild_id)
        .await?
        .ok_or(Error::AnnouncementChannelNotSet { guild_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{store::MemoryStore, test_utils::TEST_GUILD_ID};

    #[test]
    fn test_record_fields_in_order() {
        let record = AchievementRecord::new("123456", "初クリア", "おめでとう", 4).unwrap();
        let fields = record.fields();
        assert_eq!(
            fields.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            vec!["記入者ID", "内容", "コメント", "評価"]
        );
        assert_eq!(fields[0].1, "123456");
        assert_eq!(fields[3].1, "4/5");
    }

    #[test]
    fn test_user_id_must_be_digits() {
        for bad in ["", "   ", "12a4", "-123", "１２３", "<@123>"] {
            assert!(
                matches!(
                    AchievementRecord::new(bad, "a", "c", 3),
                    Err(Error::InvalidUserId { .. })
                ),
                "accepted {bad:?}"
            );
        }
        assert_eq!(
            AchievementRecord::new(" 987 ", "a", "c", 3).unwrap().user_id,
            "987"
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert!(AchievementRecord::new("1", "a", "c", MIN_RATING).is_ok());
        assert!(AchievementRecord::new("1", "a", "c", MAX_RATING).is_ok());
        assert!(matches!(
            AchievementRecord::new("1", "a", "c", 0),
            Err(Error::InvalidRating { rating: 0 })
        ));
        assert!(matches!(
            AchievementRecord::new("1", "a", "c", 6),
            Err(Error::InvalidRating { rating: 6 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_announcement_channel() -> Result<()> {
        let store = MemoryStore::new();
        let result = resolve_announcement_channel(&store, TEST_GUILD_ID).await;
        assert!(matches!(
            result,
            Err(Error::AnnouncementChannelNotSet { guild_id }) if guild_id == TEST_GUILD_ID
        ));

        store.set_announcement_channel(TEST_GUILD_ID, 55).await?;
        assert_eq!(resolve_announcement_channel(&store, TEST_GUILD_ID).await?, 55);
        Ok(())
    }

    #[test]
    fn test_panel_template_mentions_every_field() {
        for label in ["【記入者】", "【実績内容】", "【コメント】", "【評価】"] {
            assert!(PANEL_TEMPLATE.contains(label));
        }
    }
}
