use std::path::Path;
use std::sync::Arc;

use crate::errors::AppError;
use crate::services::greeting;
use crate::state::AppState;

#[derive(Debug)]
pub enum InitiateOutcome {
    Placed { sid: String },
    LeadNotFound,
}

/// Render the greeting, then ring the lead. The call is only placed once the
/// audio file exists, since Twilio fetches it as soon as the phone is
/// answered. Vendor failures are returned as-is; nothing is retried.
pub async fn initiate(state: &Arc<AppState>, lead_id: i64) -> Result<InitiateOutcome, AppError> {
    let Some(lead) = state.leads.find(lead_id) else {
        tracing::warn!(lead_id, "initiate for unknown lead");
        return Ok(InitiateOutcome::LeadNotFound);
    };

    greeting::generate(
        state.speech.as_ref(),
        state.config.voice_id.as_deref(),
        Path::new(&state.config.audio_dir),
        &lead,
    )
    .await?;
    tracing::info!(lead_id, audio_url = %state.config.audio_url(lead_id), "greeting ready");

    let sid = state
        .calls
        .place_call(&lead.phone, &state.config.twiml_url(lead_id))
        .await
        .map_err(|e| AppError::Telephony(format!("{e:#}")))?;

    tracing::info!(lead_id, sid = %sid, to = %lead.phone, "outbound call placed");
    Ok(InitiateOutcome::Placed { sid })
}
