pub mod settings;
pub mod storage;

pub use settings::{AppConfig, AvatarConfig, ChatConfig, SpeechConfig};
pub use storage::{load_config, save_config, ConfigError};
