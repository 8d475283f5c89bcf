mod azure_openai;
mod openai;
mod traits;

pub use azure_openai::AzureOpenAiChat;
pub use openai::OpenAiChat;
pub use traits::{ChatError, ChatMessage, ChatRole, ChatService, DEFAULT_SYSTEM_MESSAGE};

use reqwest::Client;

use crate::config::settings::ChatConfig;

/// 根据配置创建聊天服务
pub fn create_chat_service(
    config: &ChatConfig,
    client: &Client,
) -> Result<Box<dyn ChatService>, ChatError> {
    match config.provider.as_str() {
        "AzureOpenAI" => {
            let azure_config = config
                .azure
                .as_ref()
                .ok_or_else(|| ChatError::Config("Azure OpenAI 配置缺失".to_string()))?;
            Ok(Box::new(AzureOpenAiChat::new(
                client.clone(),
                azure_config.endpoint.clone(),
                azure_config.api_key.clone(),
                azure_config.deployment.clone(),
                azure_config.temperature,
                azure_config.max_tokens,
                azure_config.top_p,
            )))
        }
        "OpenAI" => {
            let openai_config = config
                .openai
                .as_ref()
                .ok_or_else(|| ChatError::Config("OpenAI 配置缺失".to_string()))?;
            Ok(Box::new(OpenAiChat::new(
                client.clone(),
                openai_config.api_key.clone(),
                openai_config.model.clone(),
                openai_config.temperature,
                openai_config.max_tokens,
            )))
        }
        _ => Err(ChatError::Config(format!(
            "未知的聊天服务商: {}",
            config.provider
        ))),
    }
}
