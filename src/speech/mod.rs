mod azure;
mod traits;

pub use azure::AzureSpeech;
pub use traits::{RecognitionOutcome, SpeechError, SpeechService};

use reqwest::Client;

use crate::config::settings::SpeechConfig;

/// 根据配置创建语音服务
pub fn create_speech_service(
    config: &SpeechConfig,
    client: &Client,
) -> Result<Box<dyn SpeechService>, SpeechError> {
    if config.api_key.is_empty() {
        return Err(SpeechError::Config("Speech API key 缺失".to_string()));
    }

    Ok(Box::new(AzureSpeech::new(
        client.clone(),
        config.tts_endpoint(),
        config.stt_endpoint(),
        config.api_key.clone(),
        config.voice.clone(),
        config.language.clone(),
        config.output_format.clone(),
    )))
}
