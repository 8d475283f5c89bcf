use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{assemble_messages, ChatError, ChatMessage, ChatService};

/// OpenAI 聊天服务
pub struct OpenAiChat {
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl OpenAiChat {
    pub fn new(client: Client, api_key: String, model: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            api_key,
            model,
            temperature,
            max_tokens,
            client,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl ChatService for OpenAiChat {
    async fn chat_completion(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        system_message: Option<&str>,
    ) -> Result<String, ChatError> {
        let messages = assemble_messages(history, prompt, system_message);
        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Api(format!("HTTP {}: {}", status, body)));
        }

        let result: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Api(e.to_string()))?;

        if let Some(error) = result.error {
            return Err(ChatError::Api(error.message));
        }

        result
            .choices
            .and_then(|c| c.into_iter().next().map(|choice| choice.message.content))
            .ok_or_else(|| ChatError::Api("No choices in completion response".to_string()))
    }
}
