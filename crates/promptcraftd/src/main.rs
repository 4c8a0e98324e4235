//! PromptCraft gateway daemon
//!
//! Forwards lab prompts to the chat-completion API and relays the answer.

use anyhow::Result;
use promptcraftd::config::GatewayConfig;
use promptcraftd::server::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("promptcraftd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::load();
    info!(
        "  Upstream: {} (variant: {})",
        config.upstream_url,
        config.variant.as_str()
    );
    if config.api_key.is_some() {
        info!("  Using server-held credential");
    }

    let state = AppState::new(config)?;

    tokio::select! {
        result = server::run(state) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down gracefully"),
    }

    Ok(())
}
