//! Poise framework setup and the serenity client lifecycle.

use super::{BotData, commands, handlers, user_facing_message};
use crate::{
    errors::{Error, Result},
    health::BotPresence,
    store::GuildConfigStore,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Settings the client needs beyond the store.
#[derive(Debug, Clone, Default)]
pub struct BotOptions {
    /// Register commands only in this guild instead of globally
    pub dev_guild_id: Option<u64>,
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(user_facing_message(&error))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    _data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::InteractionCreate {
        interaction: serenity::Interaction::Component(component),
    } = event
    {
        if let Err(e) = handlers::components::handle_component(ctx, component).await {
            error!(
                "Error handling component `{}`: {:?}",
                component.data.custom_id, e
            );
            handlers::components::report_failure(ctx, component, &e).await;
        }
    }
    Ok(())
}

/// Builds the poise framework with every command, the error reporter and the
/// component router.
fn build_framework(
    store: Arc<dyn GuildConfigStore>,
    presence: BotPresence,
    options: BotOptions,
) -> poise::Framework<BotData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {} (ID: {})", ready.user.tag(), ready.user.id);
                let commands = &framework.options().commands;
                if let Some(guild_id) = options.dev_guild_id {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                    info!("Registered {} commands in guild {}", commands.len(), guild_id);
                } else {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Registered {} commands globally", commands.len());
                }
                presence.set_online(ready.user.tag()).await;
                Ok(BotData::new(store, presence))
            })
        })
        .build()
}

/// Connects to Discord and runs until the gateway closes or Ctrl-C is received.
#[instrument(skip_all)]
pub async fn run_bot(
    token: String,
    store: Arc<dyn GuildConfigStore>,
    presence: BotPresence,
    options: BotOptions,
) -> Result<()> {
    if options.dev_guild_id == Some(0) {
        return Err(Error::Config {
            message: "DEV_GUILD_ID must not be 0".to_string(),
        });
    }
    let framework = build_framework(store, presence, options);

    // Member listing for /nitropresent needs the privileged members intent
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_MEMBERS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down shards");
                shard_manager.shutdown_all().await;
            }
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    debug!("Bot client stopped");
    Ok(())
}
