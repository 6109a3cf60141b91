use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::errors::AppError;
use crate::services::calls::{self, InitiateOutcome};
use crate::state::AppState;

// POST /initiate/:lead_id
pub async fn initiate_call(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<i64>,
) -> Result<Response, AppError> {
    match calls::initiate(&state, lead_id).await? {
        InitiateOutcome::Placed { sid } => Ok(Json(json!({ "sid": sid })).into_response()),
        InitiateOutcome::LeadNotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Lead not found" })),
        )
            .into_response()),
    }
}
