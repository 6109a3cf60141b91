use std::path::{Path, PathBuf};

use crate::models::Lead;
use crate::services::speech::{SpeechSynthesizer, SynthesisError};

#[derive(Debug, thiserror::Error)]
pub enum GreetingError {
    #[error("VOICE_ID is not set")]
    MissingVoice,

    #[error("lead {0} has no available slots")]
    NoSlots(i64),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("failed to write greeting audio: {0}")]
    Io(#[from] std::io::Error),
}

pub fn prompt_text(lead: &Lead) -> Result<String, GreetingError> {
    if lead.slots.is_empty() {
        return Err(GreetingError::NoSlots(lead.id));
    }

    let name = match lead.name.trim() {
        "" => "there",
        name => name,
    };
    let options: Vec<String> = lead
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| format!("Press {} for {slot}", i + 1))
        .collect();

    Ok(format!(
        "Hello {name}, to book an appointment, {}.",
        options.join(", ")
    ))
}

pub fn audio_path(audio_dir: &Path, lead_id: i64) -> PathBuf {
    audio_dir.join(format!("{lead_id}.mp3"))
}

/// Render the lead's greeting to `<audio_dir>/<id>.mp3`, replacing any
/// earlier file for the same lead. Blocks the caller until the vendor has
/// returned the whole clip.
pub async fn generate(
    synth: &dyn SpeechSynthesizer,
    voice_id: Option<&str>,
    audio_dir: &Path,
    lead: &Lead,
) -> Result<PathBuf, GreetingError> {
    let voice_id = voice_id.ok_or(GreetingError::MissingVoice)?;
    let text = prompt_text(lead)?;

    tracing::info!(lead_id = lead.id, voice_id, "synthesizing greeting");
    let audio = synth.synthesize(voice_id, &text).await?;

    tokio::fs::create_dir_all(audio_dir).await?;
    let path = audio_path(audio_dir, lead.id);
    tokio::fs::write(&path, &audio).await?;

    tracing::info!(lead_id = lead.id, bytes = audio.len(), path = %path.display(), "greeting audio written");
    Ok(path)
}
