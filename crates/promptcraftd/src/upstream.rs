//! Chat-completion upstream client.
//!
//! One request per call: no retry, no timeout, no caching.

use crate::config::{GatewayConfig, Variant};
use crate::error::GatewayError;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    config: Arc<GatewayConfig>,
}

impl UpstreamClient {
    pub fn new(config: Arc<GatewayConfig>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// JSON body for the configured variant, with a single user message.
    pub fn request_body(&self, prompt: &str) -> Value {
        let messages = json!([{ "role": "user", "content": prompt }]);

        match self.config.variant {
            Variant::Auto => json!({
                "model": self.config.auto.model,
                "messages": messages,
                "provider": {
                    "order": self.config.auto.providers,
                    "require_parameters": false
                }
            }),
            Variant::Pinned => json!({
                "model": self.config.pinned.model,
                "messages": messages,
                "max_tokens": self.config.pinned.max_tokens,
                "temperature": self.config.pinned.temperature
            }),
        }
    }

    /// Send one prompt upstream and return the completion body unchanged.
    pub async fn complete(&self, prompt: &str, api_key: &str) -> Result<Value, GatewayError> {
        let body = self.request_body(prompt);
        debug!(
            "POST {} ({} chars, variant {})",
            self.config.upstream_url,
            prompt.chars().count(),
            self.config.variant.as_str()
        );

        let response = self
            .client
            .post(&self.config.upstream_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("Upstream returned {}", status);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: Value =
            serde_json::from_str(&text).map_err(|e| GatewayError::Parse(e.to_string()))?;

        if let Some(err) = data.get("error").filter(|e| !e.is_null()) {
            error!("Upstream internal error: {}", err);
            return Err(GatewayError::Embedded(embedded_message(err)));
        }

        Ok(data)
    }
}

/// `error.message` if present, the string itself, or the raw JSON.
fn embedded_message(err: &Value) -> String {
    match err {
        Value::String(s) => s.clone(),
        other => other
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}
