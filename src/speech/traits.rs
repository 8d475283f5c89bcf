use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Recognition canceled: {0}")]
    Canceled(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 一次性识别结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// 识别出的文本
    Recognized(String),
    /// 有音频但没有匹配到语音
    NoMatch,
}

/// 语音合成 + 识别服务 trait
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// 合成纯文本，返回音频字节
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;

    /// 合成调用方提供的 SSML 标记
    async fn synthesize_ssml(&self, ssml: &str) -> Result<Vec<u8>, SpeechError>;

    /// 识别一段 WAV 音频
    async fn recognize(&self, wav_data: &[u8]) -> Result<RecognitionOutcome, SpeechError>;
}
