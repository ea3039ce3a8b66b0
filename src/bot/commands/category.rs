//! Ticket category management commands - create and delete.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            components::{DELETE_SELECT_PLACEHOLDER, category_select},
            handlers::autocomplete,
            reply_ephemeral, require_guild, user_facing_message,
        },
        core::category,
        errors::Result,
        store::CategoryUpsert,
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::{debug, info};

    /// How long the deletion select menu waits for a choice
    const DELETE_SELECT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a ticket category, or changes the emoji of an existing one.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn create_category(
        ctx: Context<'_>,
        #[description = "カテゴリー名"] name: String,
        #[description = "カテゴリーの絵文字"] emoji: String,
    ) -> Result<()> {
        let guild_id = require_guild(ctx)?;
        let outcome =
            category::save_category(ctx.data().store.as_ref(), guild_id.get(), &name, &emoji)
                .await?;

        let reply = match &outcome {
            CategoryUpsert::Created(c) => {
                format!("✅ カテゴリー **{} {}** を作成しました！", c.emoji, c.name)
            }
            CategoryUpsert::Updated(c) => {
                format!("✅ カテゴリー **{}** の絵文字を {} に更新しました。", c.name, c.emoji)
            }
        };
        reply_ephemeral(ctx, reply).await
    }

    /// Deletes a ticket category.
    ///
    /// With a name the category is removed directly; without one a select menu of the
    /// guild's categories is shown to the invoking user for 60 seconds.
    #[poise::command(
        slash_command,
        guild_only,
        default_member_permissions = "MANAGE_GUILD"
    )]
    pub async fn delete_category(
        ctx: Context<'_>,
        #[description = "削除するカテゴリー名（省略するとメニューを表示）"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        name: Option<String>,
    ) -> Result<()> {
        let guild_id = require_guild(ctx)?;
        let store = ctx.data().store.as_ref();

        if let Some(name) = name {
            let name = name.trim();
            category::remove_category(store, guild_id.get(), name).await?;
            return reply_ephemeral(ctx, format!("✅ カテゴリー **{name}** を削除しました。")).await;
        }

        let categories = store.categories(guild_id.get()).await?;
        if categories.is_empty() {
            return reply_ephemeral(ctx, "⚠️ カテゴリーが存在しません。").await;
        }

        let custom_id = format!("{}:category_delete", ctx.id());
        let embed = serenity::CreateEmbed::new()
            .title("🗑️ カテゴリー削除")
            .description("削除するカテゴリーを選択してください。")
            .colour(serenity::Colour::RED);
        let handle = ctx
            .send(
                poise::CreateReply::default()
                    .embed(embed)
                    .components(vec![category_select(
                        custom_id.clone(),
                        DELETE_SELECT_PLACEHOLDER,
                        &categories,
                    )])
                    .ephemeral(true),
            )
            .await?;

        let Some(interaction) = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(DELETE_SELECT_TIMEOUT)
            .filter(move |mci| mci.data.custom_id == custom_id)
            .await
        else {
            debug!("Category deletion menu timed out for {}", ctx.author().id);
            handle
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content("⌛ 時間切れです。もう一度お試しください。")
                        .components(vec![]),
                )
                .await?;
            return Ok(());
        };

        let serenity::ComponentInteractionDataKind::StringSelect { values } = &interaction.data.kind
        else {
            return Ok(());
        };
        let Some(selected) = values.first() else {
            return Ok(());
        };

        let content = match category::remove_category(store, guild_id.get(), selected).await {
            Ok(()) => {
                info!("Category '{}' removed via menu by {}", selected, ctx.author().id);
                format!("✅ カテゴリー **{selected}** を削除しました。")
            }
            Err(e) => user_facing_message(&e),
        };

        // Replace the menu so the same message cannot be used twice
        interaction
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(content)
                        .embeds(vec![])
                        .components(vec![]),
                ),
            )
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
