use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub avatar: AvatarConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            speech: SpeechConfig::default(),
            avatar: AvatarConfig::default(),
        }
    }
}

/// 聊天配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_provider")]
    pub provider: String,
    #[serde(default)]
    pub azure: Option<AzureOpenAiChatConfig>,
    #[serde(default)]
    pub openai: Option<OpenAiChatConfig>,
}

fn default_chat_provider() -> String {
    "AzureOpenAI".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider: default_chat_provider(),
            azure: None,
            openai: None,
        }
    }
}

/// Azure OpenAI 聊天配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiChatConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    800
}

fn default_top_p() -> f32 {
    0.95
}

/// OpenAI 聊天配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChatConfig {
    pub api_key: String,
    #[serde(default = "default_gpt_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_gpt_model() -> String {
    "gpt-4o-mini".to_string()
}

/// 语音配置（合成 + 识别）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// 端点覆盖（默认按 region 生成）
    #[serde(default)]
    pub tts_endpoint: Option<String>,
    #[serde(default)]
    pub stt_endpoint: Option<String>,
}

fn default_region() -> String {
    "westeurope".to_string()
}

fn default_voice() -> String {
    "en-US-JennyNeural".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_output_format() -> String {
    "audio-16khz-32kbitrate-mono-mp3".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            api_key: String::new(),
            voice: default_voice(),
            language: default_language(),
            output_format: default_output_format(),
            tts_endpoint: None,
            stt_endpoint: None,
        }
    }
}

impl SpeechConfig {
    pub fn tts_endpoint(&self) -> String {
        self.tts_endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            )
        })
    }

    pub fn stt_endpoint(&self) -> String {
        self.stt_endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1",
                self.region
            )
        })
    }
}

/// 虚拟形象合成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_character")]
    pub character: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_video_format")]
    pub video_format: String,
    #[serde(default = "default_video_codec")]
    pub video_codec: String,
    #[serde(default = "default_subtitle_type")]
    pub subtitle_type: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// 端点覆盖（默认按 region 生成）
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_character() -> String {
    "lisa".to_string()
}

fn default_style() -> String {
    "graceful-sitting".to_string()
}

fn default_video_format() -> String {
    "webm".to_string()
}

fn default_video_codec() -> String {
    "vp9".to_string()
}

fn default_subtitle_type() -> String {
    "soft_embedded".to_string()
}

fn default_background_color() -> String {
    "#212529".to_string()
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            api_key: String::new(),
            voice: default_voice(),
            character: default_character(),
            style: default_style(),
            video_format: default_video_format(),
            video_codec: default_video_codec(),
            subtitle_type: default_subtitle_type(),
            background_color: default_background_color(),
            endpoint: None,
        }
    }
}

impl AvatarConfig {
    /// 批量合成任务端点
    pub fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://{}.customvoice.api.speech.microsoft.com/api/texttospeech/3.1-preview1/batchsynthesis/talkingavatar",
                self.region
            )
        })
    }
}
