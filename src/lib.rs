pub mod audio;
pub mod avatar;
pub mod chat;
pub mod config;
pub mod pipeline;
pub mod speech;

pub use audio::{encode_to_pcm, encode_to_wav, AudioError};
pub use avatar::{
    create_avatar_service, AvatarError, AvatarService, AzureAvatarClient, JobHandle, JobPoll,
    JobStatus, SynthesisRequest,
};
pub use chat::{create_chat_service, ChatError, ChatMessage, ChatRole, ChatService};
pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use pipeline::{ConversationPipeline, PipelineError, TurnReply};
pub use speech::{create_speech_service, RecognitionOutcome, SpeechError, SpeechService};
