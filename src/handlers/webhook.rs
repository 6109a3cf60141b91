use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Response};
use axum::Form;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::errors::AppError;
use crate::services::{booking, twiml};
use crate::state::AppState;

fn signed_mac(auth_token: &str, url: &str, params: &BTreeMap<String, String>) -> Option<Hmac<Sha1>> {
    let mut data = url.to_string();
    for (key, value) in params {
        data.push_str(key);
        data.push_str(value);
    }

    let mut mac = Hmac::<Sha1>::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(data.as_bytes());
    Some(mac)
}

/// Twilio's request signature: base64(HMAC-SHA1(url + sorted key/value pairs)).
pub fn twilio_signature(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
) -> Option<String> {
    signed_mac(auth_token, url, params)
        .map(|mac| base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn validate_twilio_signature(
    auth_token: &str,
    signature: &str,
    url: &str,
    params: &BTreeMap<String, String>,
) -> bool {
    let Ok(provided) = base64::engine::general_purpose::STANDARD.decode(signature) else {
        return false;
    };

    signed_mac(auth_token, url, params)
        .map(|mac| mac.verify_slice(&provided).is_ok())
        .unwrap_or(false)
}

fn verify_callback(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    params: &BTreeMap<String, String>,
) -> Result<(), AppError> {
    if !state.config.validate_signatures || state.config.twilio_auth_token.is_empty() {
        return Ok(());
    }

    let signature = headers
        .get("x-twilio-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if signature.is_empty() {
        tracing::warn!(path = %uri.path(), "missing X-Twilio-Signature header");
        return Err(AppError::Forbidden("missing signature".to_string()));
    }

    // Twilio signs the public URL it was given, not whatever host we see.
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let url = format!("{}{path}", state.config.base_url);

    if !validate_twilio_signature(&state.config.twilio_auth_token, signature, &url, params) {
        tracing::warn!(url = %url, "invalid Twilio signature");
        return Err(AppError::Forbidden("invalid signature".to_string()));
    }

    Ok(())
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

// POST /twiml/:lead_id
/// Twilio asks what to do once the lead picks up.
pub async fn prompt(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<i64>,
    headers: HeaderMap,
    uri: Uri,
    form: Option<Form<BTreeMap<String, String>>>,
) -> Result<Response, AppError> {
    let params = form.map(|Form(params)| params).unwrap_or_default();
    verify_callback(&state, &headers, &uri, &params)?;

    if state.leads.find(lead_id).is_none() {
        return Err(AppError::NotFound(format!("lead {lead_id}")));
    }

    tracing::info!(
        lead_id,
        call_sid = params.get("CallSid").map(String::as_str).unwrap_or(""),
        "serving prompt"
    );

    Ok(xml(twiml::gather_prompt(
        &state.config.audio_url(lead_id),
        &format!("/gather/{lead_id}"),
        state.config.gather_timeout_secs,
    )))
}

// POST /gather/:lead_id
/// The key the lead pressed, if any.
pub async fn gather(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<i64>,
    headers: HeaderMap,
    uri: Uri,
    form: Option<Form<BTreeMap<String, String>>>,
) -> Result<Response, AppError> {
    let params = form.map(|Form(params)| params).unwrap_or_default();
    verify_callback(&state, &headers, &uri, &params)?;

    let digits = params.get("Digits").map(String::as_str).unwrap_or("");

    let choice = state
        .leads
        .record_choice(lead_id, digits, Utc::now())?
        .ok_or_else(|| AppError::NotFound(format!("lead {lead_id}")))?;

    Ok(xml(twiml::say(&booking::confirmation_message(&choice))))
}
