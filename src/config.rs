use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub base_url: String,
    pub lead_store: String,
    pub leads_csv: String,
    pub database_url: String,
    pub audio_dir: String,
    pub admin_token: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub validate_signatures: bool,
    pub elevenlabs_api_key: String,
    pub voice_id: Option<String>,
    pub tts_model_id: String,
    pub tts_output_format: String,
    pub gather_timeout_secs: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            base_url: env::var("BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            lead_store: env::var("LEAD_STORE").unwrap_or_else(|_| "csv".to_string()),
            leads_csv: env::var("LEADS_CSV").unwrap_or_else(|_| "data/leads.csv".to_string()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "leads.db".to_string()),
            audio_dir: env::var("AUDIO_DIR").unwrap_or_else(|_| "audios".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            twilio_account_sid: env::var("TWILIO_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_NUMBER").unwrap_or_default(),
            validate_signatures: env::var("TWILIO_VALIDATE_SIGNATURES")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
            voice_id: env::var("VOICE_ID").ok().filter(|v| !v.trim().is_empty()),
            tts_model_id: env::var("TTS_MODEL_ID")
                .unwrap_or_else(|_| "eleven_multilingual_v2".to_string()),
            tts_output_format: env::var("TTS_OUTPUT_FORMAT")
                .unwrap_or_else(|_| "mp3_44100_128".to_string()),
            gather_timeout_secs: env::var("GATHER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
        }
    }

    /// Public URL Twilio fetches the greeting from.
    pub fn audio_url(&self, lead_id: i64) -> String {
        format!("{}/audios/{lead_id}.mp3", self.base_url)
    }

    pub fn twiml_url(&self, lead_id: i64) -> String {
        format!("{}/twiml/{lead_id}", self.base_url)
    }
}
