use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;
use crate::services::greeting::GreetingError;
use crate::services::speech::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid lead: {0}")]
    InvalidLead(String),

    #[error("speech synthesis error: {0}")]
    Speech(String),

    #[error("telephony error: {0}")]
    Telephony(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GreetingError> for AppError {
    fn from(err: GreetingError) -> Self {
        match err {
            GreetingError::MissingVoice => AppError::Config(err.to_string()),
            GreetingError::NoSlots(_) => AppError::InvalidLead(err.to_string()),
            GreetingError::Synthesis(e) => AppError::Speech(e.to_string()),
            GreetingError::Io(e) => AppError::Io(e),
        }
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        AppError::Speech(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidLead(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Speech(_) => StatusCode::BAD_GATEWAY,
            AppError::Telephony(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
