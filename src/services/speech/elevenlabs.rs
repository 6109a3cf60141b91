use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{SpeechSynthesizer, SynthesisError, Voice};

const API_BASE: &str = "https://api.elevenlabs.io/v1";

pub struct ElevenLabsSynthesizer {
    api_key: String,
    model_id: String,
    output_format: String,
    client: reqwest::Client,
}

impl ElevenLabsSynthesizer {
    pub fn new(api_key: String, model_id: String, output_format: String) -> Self {
        Self {
            api_key,
            model_id,
            output_format,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

async fn api_error(resp: reqwest::Response) -> SynthesisError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    SynthesisError::Api { status, body }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let url = format!("{API_BASE}/text-to-speech/{voice_id}/stream");

        let resp = self
            .client
            .post(&url)
            .query(&[("output_format", self.output_format.as_str())])
            .header("xi-api-key", &self.api_key)
            .json(&json!({
                "text": text,
                "model_id": self.model_id,
            }))
            .send()
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        // The endpoint streams, but the call cannot start until the whole
        // file exists, so the body is collected in one piece.
        let audio = resp
            .bytes()
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        Ok(audio.to_vec())
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, SynthesisError> {
        let resp = self
            .client
            .get(format!("{API_BASE}/voices"))
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let data: VoicesResponse = resp
            .json()
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;

        Ok(data.voices)
    }
}
