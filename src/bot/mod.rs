//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for ticket-buddy, including all slash
//! commands, the persistent component router, and bot context management.

/// Discord command implementations (achievement, category, ticket, panel, general)
pub mod commands;
/// Builders for the select menus, buttons and overwrites attached to messages
pub mod components;
/// Framework setup, error reporting and the client lifecycle
pub mod framework;
/// Discord interaction handlers (autocomplete, component interactions)
pub mod handlers;

use crate::{
    errors::{Error, Result},
    health::BotPresence,
    store::GuildConfigStore,
};
use std::sync::Arc;

/// Shared data available to all bot commands.
/// Holds the configuration store and the presence handle read by the health endpoint.
pub struct BotData {
    /// Per-guild configuration persistence
    pub store: Arc<dyn GuildConfigStore>,
    /// Published bot identity for `/status`
    pub presence: BotPresence,
}

impl BotData {
    /// Creates a new `BotData` instance from an opened store.
    #[must_use]
    pub fn new(store: Arc<dyn GuildConfigStore>, presence: BotPresence) -> Self {
        Self { store, presence }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Guild the command was invoked in, or [`Error::GuildOnly`].
pub fn require_guild(ctx: Context<'_>) -> Result<poise::serenity_prelude::GuildId> {
    ctx.guild_id().ok_or(Error::GuildOnly)
}

/// Sends a reply only the invoking user can see.
pub async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Text shown to the user when a command fails with `error`.
///
/// Domain errors get a specific explanation; infrastructure errors get a generic notice
/// (the details go to the log, not the channel).
#[must_use]
pub fn user_facing_message(error: &Error) -> String {
    match error {
        Error::InvalidUserId { .. } => "⚠️ ユーザーIDは数字で入力してください。".to_string(),
        Error::InvalidRating { .. } => "⚠️ 評価は1〜5で入力してください。".to_string(),
        Error::AnnouncementChannelNotSet { .. } => "⚠️ 実績投稿チャンネルが未設定です。".to_string(),
        Error::CategoryNotFound { name } => format!("⚠️ カテゴリー「{name}」は存在しません。"),
        Error::InvalidCategory { message } => format!("⚠️ カテゴリーを保存できません: {message}"),
        Error::CategoryLimit { limit } => format!("⚠️ カテゴリーは最大{limit}個までです。"),
        Error::GuildOnly => "⚠️ このコマンドはサーバー内でのみ使用できます。".to_string(),
        _ => "⚠️ エラーが発生しました。".to_string(),
    }
}

pub use commands::*;
