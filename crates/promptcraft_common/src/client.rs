//! HTTP client for the PromptCraft gateway.

use crate::error::{PromptcraftError, Result};
use crate::rpc::{GenerateRequest, Reply};
use async_trait::async_trait;
use tracing::debug;

/// Where the lab client expects the gateway
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";

/// Anything that turns a prompt into a gateway reply.
///
/// The orchestration workflows are written against this trait so they can
/// run against the real gateway or a scripted fake.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Reply>;
}

/// Talks to `promptcraftd` over HTTP
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Build a client, refusing to go further without a credential.
    pub fn with_required_key(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(base_url, Some(key))),
            _ => Err(PromptcraftError::MissingCredential),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl Generator for GatewayClient {
    async fn generate(&self, prompt: &str) -> Result<Reply> {
        let body = GenerateRequest::new(prompt, self.api_key.clone());
        debug!("POST {} ({} chars)", self.endpoint(), prompt.chars().count());

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| PromptcraftError::BackendUnreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let json: serde_json::Value = response.json().await?;

        Ok(Reply::from_json(status, json))
    }
}
