//! Error types for PromptCraft.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromptcraftError>;

#[derive(Error, Debug)]
pub enum PromptcraftError {
    #[error("No API key set. Run `promptcraftctl key set <KEY>` first.")]
    MissingCredential,

    /// Gateway answered with `{error}`
    #[error("Gateway error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Unerwartetes Antwortformat: {0}")]
    UnexpectedReply(String),

    #[error("Backend not reachable. Make sure promptcraftd is running. ({0})")]
    BackendUnreachable(String),

    #[error("Step {0} is locked until the previous step completes")]
    StepLocked(usize),

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Step {0} already has a request in flight")]
    StepBusy(usize),

    #[error("Unknown step: {0}")]
    UnknownStep(usize),

    #[error("Unknown version: {0}")]
    UnknownVersion(usize),

    #[error("Consistency batch failed: {failed} of {total} runs failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Gateway reachable but its answer could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PromptcraftError {
    pub fn code(&self) -> i32 {
        match self {
            PromptcraftError::MissingCredential => -32000,
            PromptcraftError::Upstream { .. } => -32001,
            PromptcraftError::BackendUnreachable(_) => -32002,
            PromptcraftError::UnexpectedReply(_) => -32003,
            PromptcraftError::StepLocked(_) => -32010,
            PromptcraftError::EmptyPrompt => -32011,
            PromptcraftError::StepBusy(_) => -32012,
            PromptcraftError::UnknownStep(_) => -32013,
            PromptcraftError::UnknownVersion(_) => -32014,
            PromptcraftError::BatchFailed { .. } => -32020,
            PromptcraftError::Io(_) => -32006,
            PromptcraftError::Json(_) => -32700,
            PromptcraftError::Http(_) => -32603,
        }
    }

    /// True when the failure happened before or instead of a gateway answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, PromptcraftError::BackendUnreachable(_))
    }
}
