use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use tokio::sync::RwLock;

use crate::audio::encode_to_wav;
use crate::avatar::{create_avatar_service, AvatarService, JobHandle, JobPoll, SynthesisRequest};
use crate::chat::{create_chat_service, ChatMessage, ChatService};
use crate::config::AppConfig;
use crate::speech::{create_speech_service, RecognitionOutcome, SpeechService};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Audio error: {0}")]
    Audio(#[from] crate::audio::AudioError),
    #[error("Chat error: {0}")]
    Chat(#[from] crate::chat::ChatError),
    #[error("Speech error: {0}")]
    Speech(#[from] crate::speech::SpeechError),
    #[error("Avatar error: {0}")]
    Avatar(#[from] crate::avatar::AvatarError),
}

/// 一轮对话的产出
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// 助手回复文本
    pub text: String,
    /// 回复的合成音频
    pub audio: Vec<u8>,
}

impl TurnReply {
    /// 编码为前端可直接播放的 data URL
    pub fn audio_data_url(&self) -> String {
        format!("data:audio/mpeg;base64,{}", BASE64.encode(&self.audio))
    }
}

/// 对话管道
///
/// 组合根：持有一个注入的 HTTP 客户端、三个服务和滚动的对话历史。
/// 虚拟形象任务的轮询节奏（间隔、放弃策略）由上层 UI 决定，
/// 这里只透传单次查询。
pub struct ConversationPipeline {
    chat: Box<dyn ChatService>,
    speech: Box<dyn SpeechService>,
    avatar: Box<dyn AvatarService>,
    avatar_voice: String,
    history: Arc<RwLock<Vec<ChatMessage>>>,
}

impl ConversationPipeline {
    /// 从配置创建管道，三个服务共享同一个 HTTP 客户端
    pub fn new(config: &AppConfig, client: Client) -> Result<Self, PipelineError> {
        let chat = create_chat_service(&config.chat, &client)?;
        let speech = create_speech_service(&config.speech, &client)?;
        let avatar = create_avatar_service(&config.avatar, &client)?;

        Ok(Self::from_services(
            chat,
            speech,
            avatar,
            config.avatar.voice.clone(),
        ))
    }

    /// 直接注入服务实例（测试用，也便于上层自行组装）
    pub fn from_services(
        chat: Box<dyn ChatService>,
        speech: Box<dyn SpeechService>,
        avatar: Box<dyn AvatarService>,
        avatar_voice: String,
    ) -> Self {
        Self {
            chat,
            speech,
            avatar,
            avatar_voice,
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// 识别前端采集的原始采样，NoMatch 时返回 None
    pub async fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
        channels: u16,
    ) -> Result<Option<String>, PipelineError> {
        let wav = encode_to_wav(samples, sample_rate, channels)?;
        match self.speech.recognize(&wav).await? {
            RecognitionOutcome::Recognized(text) => Ok(Some(text)),
            RecognitionOutcome::NoMatch => {
                tracing::info!("Transcription returned no match");
                Ok(None)
            }
        }
    }

    /// 一轮对话：补全回复、更新历史、合成回复音频
    pub async fn chat_turn(&self, user_text: &str) -> Result<TurnReply, PipelineError> {
        let history = self.history.read().await.clone();
        let reply = self.chat.chat_completion(&history, user_text, None).await?;

        {
            let mut history = self.history.write().await;
            history.push(ChatMessage::user(user_text));
            history.push(ChatMessage::assistant(reply.clone()));
        }

        tracing::info!("Chat turn completed, reply length={}", reply.len());

        let audio = self.speech.synthesize(&reply).await?;

        Ok(TurnReply { text: reply, audio })
    }

    /// 提交一个虚拟形象合成任务
    pub async fn start_avatar(&self, text: &str) -> Result<JobHandle, PipelineError> {
        let mut request = SynthesisRequest::new(text);
        request.voice = self.avatar_voice.clone();
        Ok(self.avatar.submit(&request).await?)
    }

    /// 查询虚拟形象任务状态（单次，轮询调度由调用方负责）
    pub async fn avatar_status(&self, handle: &JobHandle) -> Result<JobPoll, PipelineError> {
        Ok(self.avatar.poll(handle).await?)
    }

    /// 当前对话历史快照
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.history.read().await.clone()
    }

    /// 清空对话历史
    pub async fn reset(&self) {
        self.history.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::avatar::{AvatarError, JobStatus};
    use crate::chat::{ChatError, ChatService};
    use crate::speech::{SpeechError, SpeechService};

    struct EchoChat;

    #[async_trait]
    impl ChatService for EchoChat {
        async fn chat_completion(
            &self,
            history: &[ChatMessage],
            prompt: &str,
            _system_message: Option<&str>,
        ) -> Result<String, ChatError> {
            Ok(format!("reply to '{}' after {} messages", prompt, history.len()))
        }
    }

    struct SilentSpeech;

    #[async_trait]
    impl SpeechService for SilentSpeech {
        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(vec![1, 2, 3])
        }

        async fn synthesize_ssml(&self, _ssml: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(vec![])
        }

        async fn recognize(&self, _wav_data: &[u8]) -> Result<RecognitionOutcome, SpeechError> {
            Ok(RecognitionOutcome::NoMatch)
        }
    }

    struct FixedAvatar;

    #[async_trait]
    impl AvatarService for FixedAvatar {
        async fn submit(&self, request: &SynthesisRequest) -> Result<JobHandle, AvatarError> {
            assert_eq!(request.voice, "en-US-AriaNeural");
            Ok(JobHandle::new("job-1"))
        }

        async fn poll(&self, _handle: &JobHandle) -> Result<JobPoll, AvatarError> {
            Ok(JobPoll {
                status: JobStatus::Running,
                result: None,
            })
        }
    }

    fn pipeline() -> ConversationPipeline {
        ConversationPipeline::from_services(
            Box::new(EchoChat),
            Box::new(SilentSpeech),
            Box::new(FixedAvatar),
            "en-US-AriaNeural".to_string(),
        )
    }

    #[tokio::test]
    async fn chat_turn_appends_user_and_assistant_messages() {
        let pipeline = pipeline();

        let first = pipeline.chat_turn("hello").await.unwrap();
        assert_eq!(first.text, "reply to 'hello' after 0 messages");
        assert_eq!(first.audio, vec![1, 2, 3]);

        let second = pipeline.chat_turn("again").await.unwrap();
        assert_eq!(second.text, "reply to 'again' after 2 messages");

        let history = pipeline.history().await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[3].content, "reply to 'again' after 2 messages");

        pipeline.reset().await;
        assert!(pipeline.history().await.is_empty());
    }

    #[tokio::test]
    async fn transcribe_maps_no_match_to_none() {
        let pipeline = pipeline();
        let result = pipeline.transcribe(&[0.1, -0.1], 16000, 1).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn avatar_submission_uses_configured_voice() {
        let pipeline = pipeline();
        let handle = pipeline.start_avatar("hi there").await.unwrap();
        assert_eq!(handle.as_str(), "job-1");

        let poll = pipeline.avatar_status(&handle).await.unwrap();
        assert_eq!(poll.status, JobStatus::Running);
        assert!(poll.result.is_none());
    }

    #[test]
    fn audio_data_url_is_base64_encoded() {
        let reply = TurnReply {
            text: "hi".to_string(),
            audio: vec![1, 2, 3],
        };
        assert_eq!(reply.audio_data_url(), "data:audio/mpeg;base64,AQID");
    }
}
