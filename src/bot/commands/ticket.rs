//! Ticket commands - the category select panel and ticket invitations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, components, reply_ephemeral, require_guild},
        errors::Result,
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::info;

    /// Posts a ticket panel: an embed plus a select menu of this server's categories.
    ///
    /// Choosing a category opens a private ticket channel. The panel keeps working
    /// after the bot restarts.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn ticket_panel(
        ctx: Context<'_>,
        #[description = "パネルのタイトル"] title: String,
        #[description = "パネルの説明"] description: String,
        #[description = "パネルに表示する画像のURL"] image_url: Option<String>,
    ) -> Result<()> {
        let guild_id = require_guild(ctx)?;
        let categories = ctx.data().store.categories(guild_id.get()).await?;
        if categories.is_empty() {
            return reply_ephemeral(ctx, "⚠️ カテゴリーが登録されていません。").await;
        }

        let mut embed = serenity::CreateEmbed::new()
            .title(title)
            .description(description)
            .colour(serenity::Colour::BLUE);
        if let Some(url) = image_url.filter(|url| !url.trim().is_empty()) {
            embed = embed.image(url);
        }

        ctx.send(
            poise::CreateReply::default()
                .embed(embed)
                .components(vec![components::ticket_select(&categories)]),
        )
        .await?;
        info!(
            "Ticket panel with {} categories posted in {} by {}",
            categories.len(),
            ctx.channel_id(),
            ctx.author().id
        );
        Ok(())
    }

    /// Lets another member view and write in the current ticket channel.
    #[poise::command(slash_command, guild_only, rename = "discordacounts")]
    pub async fn ticket_invite(
        ctx: Context<'_>,
        #[description = "チケットに招待するメンバー"] user: serenity::Member,
    ) -> Result<()> {
        let overwrite = serenity::PermissionOverwrite {
            allow: serenity::Permissions::VIEW_CHANNEL | serenity::Permissions::SEND_MESSAGES,
            deny: serenity::Permissions::empty(),
            kind: serenity::PermissionOverwriteType::Member(user.user.id),
        };
        ctx.channel_id()
            .create_permission(ctx.http(), overwrite)
            .await?;
        info!(
            "{} invited {} to channel {}",
            ctx.author().id,
            user.user.id,
            ctx.channel_id()
        );

        reply_ephemeral(
            ctx,
            format!("✅ {} にチケット閲覧権限を付与しました！", user.mention()),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
