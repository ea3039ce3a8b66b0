//! Free-form embed commands - verify panels and plain embeds.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, components},
        core::embed,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Posts a panel whose button gives the clicking member a role.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn verify(
        ctx: Context<'_>,
        #[description = "パネルのタイトル"] title: String,
        #[description = "パネルの説明"] description: String,
        #[description = "付与するロール"] role: serenity::Role,
        #[description = "タイトルの前に付ける絵文字"] emoji: Option<String>,
    ) -> Result<()> {
        let embed = serenity::CreateEmbed::new()
            .title(embed::verify_title(&title, emoji.as_deref()))
            .description(description)
            .colour(serenity::Colour::DARK_GREEN);

        ctx.send(
            poise::CreateReply::default()
                .embed(embed)
                .components(vec![components::role_button_row(role.id)]),
        )
        .await?;
        info!(
            "Verify panel for role {} posted in {}",
            role.id,
            ctx.channel_id()
        );
        Ok(())
    }

    /// Sends an embed, optionally prefixing the title with comma-separated emoji.
    #[poise::command(slash_command, guild_only)]
    pub async fn send_embed(
        ctx: Context<'_>,
        #[description = "タイトル"] title: String,
        #[description = "本文"] description: String,
        #[description = "タイトルの前に付ける絵文字（カンマ区切り）"] emojis: Option<String>,
    ) -> Result<()> {
        let embed = serenity::CreateEmbed::new()
            .title(embed::emoji_prefixed_title(emojis.as_deref(), &title))
            .description(description)
            .colour(serenity::Colour::BLUE);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
