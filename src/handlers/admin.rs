use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Lead;
use crate::services::speech::Voice;
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct LeadResponse {
    id: i64,
    phone: String,
    name: String,
    slots: Vec<String>,
    booked_slot: Option<String>,
    status: String,
    booking_time: Option<String>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            phone: lead.phone,
            name: lead.name,
            slots: lead.slots.iter().map(str::to_string).collect(),
            booked_slot: lead.booked_slot,
            status: lead.status.as_str().to_string(),
            booking_time: lead.booking_time.map(|t| t.to_rfc3339()),
        }
    }
}

// GET /api/leads
pub async fn get_leads(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<LeadResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    Ok(Json(
        state.leads.all().into_iter().map(LeadResponse::from).collect(),
    ))
}

// GET /api/voices
/// Lists the vendor voices so an operator can pick a VOICE_ID.
pub async fn get_voices(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Voice>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let voices = state.speech.list_voices().await?;
    Ok(Json(voices))
}
