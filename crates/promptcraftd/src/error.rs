//! Gateway failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use promptcraft_common::rpc::ErrorBody;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Request body missing, not JSON, or not a `GenerateRequest`
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("Missing API key")]
    MissingKey,

    /// Upstream answered 2xx but put an `error` object in the body
    #[error("{0}")]
    Embedded(String),

    /// Upstream answered with a non-success status
    #[error("Upstream error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Network failure or unreadable response
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::EmptyPrompt => StatusCode::BAD_REQUEST,
            GatewayError::MissingKey => StatusCode::UNAUTHORIZED,
            GatewayError::Embedded(_) => StatusCode::PAYMENT_REQUIRED,
            GatewayError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Transport(_) | GatewayError::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
