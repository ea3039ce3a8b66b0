//! Router for component interactions on persistent panel messages.
//!
//! Panels posted by `/ticket_panel` and `/verify`, and the delete button inside ticket
//! channels, carry custom IDs produced by [`ComponentAction`]. Nothing about them is
//! kept in memory, so they keep working across restarts. Custom IDs that do not parse
//! belong to short-lived collectors (e.g. `/delete_category`) and are ignored here.

use crate::{
    bot::{components, user_facing_message},
    core::ticket::{ComponentAction, TicketAccessPlan, ticket_channel_name},
    errors::{Error, Result},
};
use poise::serenity_prelude::{self as serenity, Mentionable};
use tracing::{debug, info, warn};

/// Dispatches a component interaction to its handler.
pub async fn handle_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    let Some(action) = ComponentAction::parse(&component.data.custom_id) else {
        debug!(
            "Ignoring component with foreign custom ID `{}`",
            component.data.custom_id
        );
        return Ok(());
    };

    match action {
        ComponentAction::OpenTicket => open_ticket(ctx, component).await,
        ComponentAction::CloseTicket => close_ticket(ctx, component).await,
        ComponentAction::GrantRole { role_id } => {
            grant_role(ctx, component, serenity::RoleId::new(role_id)).await
        }
    }
}

/// Tells the user a component action failed.
///
/// Only the [`user_facing_message`] text is shown; the error itself is logged by the
/// caller. The interaction may already have been acknowledged, so a follow-up is tried
/// when the initial response is rejected.
pub async fn report_failure(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    error: &Error,
) {
    let content = failure_notice(error);
    if respond_ephemeral(ctx, component, content.clone()).await.is_ok() {
        return;
    }
    let followup = serenity::CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = component.create_followup(&ctx.http, followup).await {
        warn!("Failed to report component error: {}", e);
    }
}

/// Text shown for a failed component action. Infrastructure details stay in the log.
fn failure_notice(error: &Error) -> String {
    user_facing_message(error)
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: impl Into<String>,
) -> Result<()> {
    let message = serenity::CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    component
        .create_response(&ctx.http, serenity::CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// Creates a private ticket channel for the selected category.
async fn open_ticket(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    let serenity::ComponentInteractionDataKind::StringSelect { values } = &component.data.kind
    else {
        warn!("Ticket select fired without string values");
        return Ok(());
    };
    let Some(selected) = values.first() else {
        return Ok(());
    };
    let guild_id = component.guild_id.ok_or(Error::GuildOnly)?;
    let user = &component.user;

    // Channel creation can outlive the three second response window
    component.defer_ephemeral(&ctx.http).await?;

    let admin_roles: Vec<u64> = guild_id
        .roles(&ctx.http)
        .await?
        .values()
        .filter(|role| role.permissions.administrator())
        .map(|role| role.id.get())
        .collect();
    let bot_id = ctx.cache.current_user().id;
    let plan = TicketAccessPlan::build(guild_id.get(), user.id.get(), bot_id.get(), &admin_roles);

    let channel_name = {
        let mut rng = rand::rng();
        ticket_channel_name(&user.name, &mut rng)
    };

    let channel = guild_id
        .create_channel(
            &ctx.http,
            serenity::CreateChannel::new(&channel_name)
                .kind(serenity::ChannelType::Text)
                .permissions(components::overwrites(&plan)),
        )
        .await?;
    info!(
        "Opened ticket #{} for {} in guild {} (category {})",
        channel_name, user.id, guild_id, selected
    );

    channel
        .send_message(
            &ctx.http,
            serenity::CreateMessage::new()
                .content(format!(
                    "✅ {} さんのチケットです。カテゴリー: **{selected}**",
                    user.mention()
                ))
                .components(vec![components::close_ticket_row()]),
        )
        .await?;

    component
        .edit_response(
            &ctx.http,
            serenity::EditInteractionResponse::new()
                .content(format!("✅ カテゴリー「{selected}」でチケットを作成しました！")),
        )
        .await?;
    Ok(())
}

/// Deletes the ticket channel the button lives in.
async fn close_ticket(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
) -> Result<()> {
    // Acknowledge first; the interaction's channel is gone afterwards
    respond_ephemeral(ctx, component, "✅ チケットを削除しました。").await?;
    component.channel_id.delete(&ctx.http).await?;
    info!(
        "Ticket channel {} closed by {}",
        component.channel_id, component.user.id
    );
    Ok(())
}

/// Gives the clicking member the button's role unless they already have it.
async fn grant_role(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    role_id: serenity::RoleId,
) -> Result<()> {
    let guild_id = component.guild_id.ok_or(Error::GuildOnly)?;
    let Some(member) = component.member.as_ref() else {
        return Err(Error::GuildOnly);
    };

    let role_name = guild_id
        .roles(&ctx.http)
        .await?
        .get(&role_id)
        .map_or_else(|| role_id.to_string(), |role| role.name.clone());

    if member.roles.contains(&role_id) {
        return respond_ephemeral(
            ctx,
            component,
            format!("すでに「{role_name}」ロールを持っています。"),
        )
        .await;
    }

    let reply = match member.add_role(&ctx.http, role_id).await {
        Ok(()) => {
            info!("Granted role {} to {} in guild {}", role_id, member.user.id, guild_id);
            format!("✅ 「{role_name}」を付与しました！")
        }
        Err(e) => {
            warn!("Could not grant role {} to {}: {}", role_id, member.user.id, e);
            format!("⚠️ エラー: {e}")
        }
    };
    respond_ephemeral(ctx, component, reply).await
}
