use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::{RecognitionOutcome, SpeechError, SpeechService};

/// Azure Cognitive Speech 服务（REST）
///
/// 合成走区域 TTS 端点（SSML 请求体），识别走区域 STT 端点（一次性模式）。
pub struct AzureSpeech {
    tts_endpoint: String,
    stt_endpoint: String,
    api_key: String,
    voice: String,
    language: String,
    output_format: String,
    client: Client,
}

impl AzureSpeech {
    pub fn new(
        client: Client,
        tts_endpoint: String,
        stt_endpoint: String,
        api_key: String,
        voice: String,
        language: String,
        output_format: String,
    ) -> Self {
        Self {
            tts_endpoint,
            stt_endpoint,
            api_key,
            voice,
            language,
            output_format,
            client,
        }
    }

    /// 把纯文本包进 SSML
    fn build_ssml(&self, text: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{lang}'><voice name='{voice}'>{text}</voice></speak>",
            lang = self.language,
            voice = self.voice,
            text = escape_xml(text),
        )
    }

    async fn synthesize_body(&self, ssml: String) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(&self.tts_endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .body(ssml)
            .send()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| SpeechError::Network(e.to_string()))?;
            return Err(SpeechError::Api(format!("HTTP {}: {}", status, body)));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;
        Ok(audio.to_vec())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    recognition_status: String,
    #[serde(rename = "DisplayText")]
    display_text: Option<String>,
}

#[async_trait]
impl SpeechService for AzureSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        self.synthesize_body(self.build_ssml(text)).await
    }

    async fn synthesize_ssml(&self, ssml: &str) -> Result<Vec<u8>, SpeechError> {
        self.synthesize_body(ssml.to_string()).await
    }

    async fn recognize(&self, wav_data: &[u8]) -> Result<RecognitionOutcome, SpeechError> {
        let url = format!("{}?language={}", self.stt_endpoint, self.language);

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "audio/wav; codecs=audio/pcm; samplerate=16000")
            .body(wav_data.to_vec())
            .send()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SpeechError::Api(format!("HTTP {}: {}", status, body)));
        }

        let result: RecognitionResponse =
            serde_json::from_str(&body).map_err(|e| SpeechError::Api(e.to_string()))?;

        match result.recognition_status.as_str() {
            "Success" => {
                let text = result.display_text.unwrap_or_default();
                Ok(RecognitionOutcome::Recognized(text))
            }
            "NoMatch" => {
                tracing::info!("Speech recognition: no match");
                Ok(RecognitionOutcome::NoMatch)
            }
            other => Err(SpeechError::Canceled(other.to_string())),
        }
    }
}
