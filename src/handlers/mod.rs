pub mod admin;
pub mod calls;
pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let audio_dir = state.config.audio_dir.clone();

    Router::new()
        .route("/health", get(health::health))
        .route("/initiate/:lead_id", post(calls::initiate_call))
        .route("/twiml/:lead_id", post(webhook::prompt))
        .route("/gather/:lead_id", post(webhook::gather))
        .route("/api/leads", get(admin::get_leads))
        .route("/api/voices", get(admin::get_voices))
        .nest_service("/audios", ServeDir::new(audio_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
