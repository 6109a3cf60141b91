pub mod elevenlabs;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The vendor answered with a non-success status.
    #[error("TTS generation failed ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("TTS request failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` in the given voice and return the complete audio body.
    async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, SynthesisError>;

    async fn list_voices(&self) -> Result<Vec<Voice>, SynthesisError>;
}
