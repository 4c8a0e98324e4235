//! Wire types between the lab client and the gateway.

use crate::error::{PromptcraftError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Caller credential; ignored when the gateway holds its own key.
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            api_key,
        }
    }
}

/// Error body returned by the gateway on every failure path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `GET /v1/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub variant: String,
    pub server_credential: bool,
}

/// A gateway answer, classified the way the labs render it.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `choices[0].message.content`
    Content(String),
    /// Gateway reported `{error}` with this status
    Failed { status: u16, message: String },
    /// Valid JSON without content or error
    Unexpected(Value),
}

impl Reply {
    pub fn from_json(status: u16, body: Value) -> Self {
        if let Some(err) = body.get("error") {
            let message = match err {
                Value::String(s) => s.clone(),
                other => other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            };
            return Reply::Failed { status, message };
        }

        match extract_content(&body) {
            Some(text) => Reply::Content(text.to_string()),
            None => Reply::Unexpected(body),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Reply::Content(text) => Some(text),
            _ => None,
        }
    }

    /// Content, or the failure as a `PromptcraftError`.
    pub fn into_content(self) -> Result<String> {
        match self {
            Reply::Content(text) => Ok(text),
            Reply::Failed { status, message } => {
                Err(PromptcraftError::Upstream { status, message })
            }
            Reply::Unexpected(body) => Err(PromptcraftError::UnexpectedReply(body.to_string())),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Content(_))
    }

    /// Text shown to the learner
    pub fn display_text(&self) -> String {
        match self {
            Reply::Content(text) => text.clone(),
            Reply::Failed { message, .. } => format!("Fehler: {}", message),
            Reply::Unexpected(body) => format!("Unerwartetes Antwortformat: {}", body),
        }
    }
}

/// Pull `choices[0].message.content` out of a completion body.
pub fn extract_content(body: &Value) -> Option<&str> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}
