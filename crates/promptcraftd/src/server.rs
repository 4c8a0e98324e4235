//! HTTP server for promptcraftd

use crate::config::GatewayConfig;
use crate::routes;
use crate::upstream::UpstreamClient;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: UpstreamClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let config = Arc::new(config);
        let upstream =
            UpstreamClient::new(Arc::clone(&config)).context("Failed to build HTTP client")?;
        Ok(Self {
            config,
            upstream,
            start_time: Instant::now(),
        })
    }
}

/// Router with all gateway routes and layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::generate_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
