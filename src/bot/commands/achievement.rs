//! Achievement Discord commands - channel setup, posting and the template panel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, reply_ephemeral, require_guild},
        core::achievement::{
            self, ACHIEVEMENT_EMBED_TITLE, AchievementRecord, PANEL_FOOTER, PANEL_TEMPLATE,
            PANEL_TITLE,
        },
        errors::Result,
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::info;

    /// Sets the channel achievements are posted to (administrators only).
    #[poise::command(
        slash_command,
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn achievement_channel(
        ctx: Context<'_>,
        #[description = "実績を投稿するチャンネル"]
        #[channel_types("Text")]
        channel: serenity::GuildChannel,
    ) -> Result<()> {
        let guild_id = require_guild(ctx)?;

        ctx.data()
            .store
            .set_announcement_channel(guild_id.get(), channel.id.get())
            .await?;
        info!(
            "Achievement channel for guild {} set to {}",
            guild_id, channel.id
        );

        reply_ephemeral(
            ctx,
            format!(
                "✅ 実績投稿チャンネルを {} に設定しました。",
                channel.mention()
            ),
        )
        .await
    }

    /// Posts an achievement to the configured channel.
    ///
    /// The user ID must be numeric and the rating between 1 and 5. The target channel
    /// must still exist in this server.
    #[poise::command(slash_command, guild_only)]
    pub async fn write_achievement(
        ctx: Context<'_>,
        #[description = "記録者のユーザーID（数字）"] user_id: String,
        #[description = "実績内容"] achievement: String,
        #[description = "コメント"] comment: String,
        #[description = "評価（1〜5）"]
        #[min = 1]
        #[max = 5]
        rating: u8,
    ) -> Result<()> {
        let guild_id = require_guild(ctx)?;
        let record = AchievementRecord::new(&user_id, &achievement, &comment, rating.into())?;
        let channel_id =
            achievement::resolve_announcement_channel(ctx.data().store.as_ref(), guild_id.get())
                .await?;

        let channels = guild_id.channels(ctx.http()).await?;
        let target = (channel_id != 0)
            .then(|| serenity::ChannelId::new(channel_id))
            .and_then(|id| channels.get(&id));
        let Some(target) = target else {
            reply_ephemeral(ctx, "⚠️ チャンネルが見つかりません。").await?;
            return Ok(());
        };

        let embed = serenity::CreateEmbed::new()
            .title(ACHIEVEMENT_EMBED_TITLE)
            .colour(serenity::Colour::GOLD)
            .fields(
                record
                    .fields()
                    .into_iter()
                    .map(|(name, value)| (name, value, false)),
            );
        target
            .send_message(ctx.http(), serenity::CreateMessage::new().embed(embed))
            .await?;
        info!(
            "Achievement for {} posted to {} by {}",
            record.user_id,
            target.id,
            ctx.author().id
        );

        reply_ephemeral(ctx, "✅ 実績を投稿しました！").await
    }

    /// Posts a fill-in template for recording achievements by hand.
    #[poise::command(slash_command, guild_only)]
    pub async fn achievement_panel(ctx: Context<'_>) -> Result<()> {
        let embed = serenity::CreateEmbed::new()
            .title(PANEL_TITLE)
            .description(PANEL_TEMPLATE)
            .colour(serenity::Colour::GOLD)
            .footer(serenity::CreateEmbedFooter::new(PANEL_FOOTER));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
