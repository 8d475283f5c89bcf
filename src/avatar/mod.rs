mod client;
mod traits;
mod types;

pub use client::AzureAvatarClient;
pub use traits::{AvatarError, AvatarService};
pub use types::{JobHandle, JobPoll, JobStatus, SynthesisRequest};

use reqwest::Client;

use crate::config::settings::AvatarConfig;

/// 根据配置创建虚拟形象合成服务
pub fn create_avatar_service(
    config: &AvatarConfig,
    client: &Client,
) -> Result<Box<dyn AvatarService>, AvatarError> {
    if config.api_key.is_empty() {
        return Err(AvatarError::Config("Avatar API key 缺失".to_string()));
    }

    Ok(Box::new(AzureAvatarClient::new(
        client.clone(),
        config.endpoint(),
        config.api_key.clone(),
    )))
}
