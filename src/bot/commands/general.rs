//! General Discord commands - ping, help and the member ID draw.
//! Apart from `nitropresent`, these commands touch neither the store nor the guild.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, reply_ephemeral, require_guild},
        core::lottery::{self, MAX_DRAW},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use tracing::debug;

    /// Page size of the guild member listing endpoint
    const MEMBER_PAGE_SIZE: u64 = 1000;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays a summary of the available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**コマンド一覧**\n\n\
        **チケット**\n\
        • `/create_category <name> <emoji>` - カテゴリーを作成（同名なら絵文字を更新）\n\
        • `/delete_category [name]` - カテゴリーを削除（名前省略でメニュー表示）\n\
        • `/ticket_panel <title> <description> [image_url]` - チケットパネルを設置\n\
        • `/discordacounts <user>` - このチケットにメンバーを招待\n\n\
        **実績**\n\
        • `/achievement_channel <channel>` - 実績投稿チャンネルを設定（管理者）\n\
        • `/write_achievement <user_id> <achievement> <comment> <rating>` - 実績を投稿\n\
        • `/achievement_panel` - 実績テンプレートを表示\n\n\
        **その他**\n\
        • `/verify <title> <description> <role> [emoji]` - ロール付与パネルを設置\n\
        • `/send_embed <title> <description> [emojis]` - 埋め込みを送信\n\
        • `/nitropresent` - ランダムなメンバーIDを表示\n\
        • `/ping` - 応答確認\n\
        • `/help` - このメッセージを表示";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows up to 25 randomly chosen non-bot member IDs of this server.
    #[poise::command(slash_command, guild_only)]
    pub async fn nitropresent(ctx: Context<'_>) -> Result<()> {
        let guild_id = require_guild(ctx)?;

        let mut member_ids = Vec::new();
        let mut after: Option<serenity::UserId> = None;
        loop {
            let page = guild_id
                .members(ctx.http(), Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let page_len = page.len();
            after = page.last().map(|member| member.user.id);
            member_ids.extend(
                page.iter()
                    .filter(|member| !member.user.bot)
                    .map(|member| member.user.id.get()),
            );
            if u64::try_from(page_len).unwrap_or(0) < MEMBER_PAGE_SIZE {
                break;
            }
        }
        debug!(
            "Drawing from {} members of guild {}",
            member_ids.len(),
            guild_id
        );

        if member_ids.is_empty() {
            return reply_ephemeral(ctx, "⚠️ メンバーがいません。").await;
        }

        let picked = {
            let mut rng = rand::rng();
            lottery::pick_member_ids(member_ids, MAX_DRAW, &mut rng)
        };
        reply_ephemeral(
            ctx,
            format!(
                "🎲 ランダムなユーザーID:\n{}",
                lottery::format_member_ids(&picked)
            ),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
