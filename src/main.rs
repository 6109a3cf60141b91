use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use leadcaller::config::AppConfig;
use leadcaller::db;
use leadcaller::handlers;
use leadcaller::services::leads::LeadBook;
use leadcaller::services::speech::elevenlabs::ElevenLabsSynthesizer;
use leadcaller::services::telephony::twilio::TwilioCallProvider;
use leadcaller::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.voice_id.is_none() {
        tracing::warn!("VOICE_ID is not set, outbound calls will fail until it is");
    }
    if config.twilio_account_sid.is_empty() || config.twilio_phone_number.is_empty() {
        tracing::warn!("Twilio credentials incomplete (TWILIO_SID / TWILIO_NUMBER)");
    }

    let leads = LeadBook::load(db::open_store(&config)?)?;

    let calls = TwilioCallProvider::new(
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
        config.twilio_phone_number.clone(),
    );
    let speech = ElevenLabsSynthesizer::new(
        config.elevenlabs_api_key.clone(),
        config.tts_model_id.clone(),
        config.tts_output_format.clone(),
    );

    let state = Arc::new(AppState {
        leads,
        config: config.clone(),
        calls: Box::new(calls),
        speech: Box::new(speech),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr} (public base {})", config.base_url);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
