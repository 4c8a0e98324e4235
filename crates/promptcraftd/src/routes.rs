//! API routes for promptcraftd

use crate::error::GatewayError;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use promptcraft_common::rpc::{GenerateRequest, HealthResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Generate Routes
// ============================================================================

pub fn generate_routes() -> Router<AppStateArc> {
    Router::new().route("/api/generate", post(generate))
}

/// Forward a prompt upstream and relay the completion body unchanged.
async fn generate(
    State(state): State<AppStateArc>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Value>, GatewayError> {
    let Json(req) = body.map_err(|e| GatewayError::BadRequest(e.body_text()))?;
    if req.prompt.trim().is_empty() {
        return Err(GatewayError::EmptyPrompt);
    }

    let api_key = resolve_key(state.config.api_key.as_deref(), req.api_key.as_deref())
        .ok_or(GatewayError::MissingKey)?;

    info!("  Generate: {} chars", req.prompt.chars().count());
    let body = state.upstream.complete(&req.prompt, api_key).await?;
    Ok(Json(body))
}

/// The server-held key wins; the caller's key is the fallback.
fn resolve_key<'a>(server: Option<&'a str>, caller: Option<&'a str>) -> Option<&'a str> {
    server
        .or(caller)
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        variant: state.config.variant.as_str().to_string(),
        server_credential: state.config.api_key.is_some(),
    })
}
