use dotenvy::dotenv;
use std::env;
use ticket_buddy::{
    bot::framework::{BotOptions, run_bot},
    config,
    errors::{Error, Result},
    health::{self, BotPresence},
    store,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration (config.toml plus env overrides)
    let app_config = config::load_app_configuration()?;
    info!("Using {} storage backend", app_config.storage.backend);

    // 4. Open the configuration store
    let store = store::open_store(&app_config.storage)
        .await
        .inspect_err(|e| error!("Failed to open store: {}", e))?;

    // 5. Start the liveness endpoint next to the bot
    let presence = BotPresence::default();
    if app_config.health.enabled {
        let health_config = app_config.health.clone();
        let health_presence = presence.clone();
        tokio::spawn(async move {
            if let Err(e) = health::serve(health_config, health_presence).await {
                error!("Health endpoint stopped: {}", e);
            }
        });
    }

    // 6. Run the bot; the token is read directly before use, never stored in AppConfig
    let token = env::var("DISCORD_TOKEN")
        .inspect_err(|e| error!("DISCORD_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let options = BotOptions {
        dev_guild_id: app_config.discord.dev_guild_id,
    };
    run_bot(token, store, presence, options).await
}
