//! Liveness endpoint for hosting platforms that probe an HTTP port.
//!
//! Serves:
//! - `GET /`: plain-text liveness message
//! - `GET /status`: JSON with the logged-in bot tag, or `"offline"` before ready

use crate::{config::HealthConfig, errors::Result};
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Body of `GET /`
pub const LIVENESS_MESSAGE: &str = "Discord Bot is running!";

/// The bot's user tag, published by the bot once it is ready.
#[derive(Debug, Clone, Default)]
pub struct BotPresence {
    tag: Arc<RwLock<Option<String>>>,
}

impl BotPresence {
    /// Records the logged-in user tag.
    pub async fn set_online(&self, tag: impl Into<String>) {
        *self.tag.write().await = Some(tag.into());
    }

    /// Current tag, `None` until the bot is ready.
    pub async fn tag(&self) -> Option<String> {
        self.tag.read().await.clone()
    }
}

/// Response body of `GET /status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `"online"` while the process serves requests
    pub status: &'static str,
    /// Bot user tag or `"offline"`
    pub bot: String,
}

/// Build the axum router for the liveness endpoint.
pub fn build_router(presence: BotPresence) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/status", get(status))
        .with_state(presence)
}

/// Serves the liveness endpoint until the process exits.
///
/// This runs as a background task; call it from `tokio::spawn`.
pub async fn serve(config: HealthConfig, presence: BotPresence) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Health endpoint listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(presence)).await?;
    Ok(())
}

/// `GET /`: liveness.
async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /status`: bot presence.
async fn status(State(presence): State<BotPresence>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        bot: presence.tag().await.unwrap_or_else(|| "offline".to_string()),
    })
}
