use crate::config::AppConfig;
use crate::services::leads::LeadBook;
use crate::services::speech::SpeechSynthesizer;
use crate::services::telephony::CallProvider;

pub struct AppState {
    pub leads: LeadBook,
    pub config: AppConfig,
    pub calls: Box<dyn CallProvider>,
    pub speech: Box<dyn SpeechSynthesizer>,
}
