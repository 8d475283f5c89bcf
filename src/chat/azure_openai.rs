use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{assemble_messages, ChatError, ChatMessage, ChatService};

const API_VERSION: &str = "2024-02-01";

/// Azure OpenAI 聊天服务
pub struct AzureOpenAiChat {
    endpoint: String,
    api_key: String,
    deployment: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    client: Client,
}

impl AzureOpenAiChat {
    pub fn new(
        client: Client,
        endpoint: String,
        api_key: String,
        deployment: String,
        temperature: f32,
        max_tokens: u32,
        top_p: f32,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            deployment,
            temperature,
            max_tokens,
            top_p,
            client,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
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
impl ChatService for AzureOpenAiChat {
    async fn chat_completion(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        system_message: Option<&str>,
    ) -> Result<String, ChatError> {
        let messages = assemble_messages(history, prompt, system_message);
        let request = CompletionRequest {
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        };

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
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
