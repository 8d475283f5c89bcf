use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 默认系统提示词
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You're a helpful assistant";

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// 带角色标签的对话消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// 组装发送给服务端的消息序列：
/// 系统提示在前（未提供时用默认值），然后是历史消息，
/// 最后把非空 prompt 追加为用户消息。
pub(super) fn assemble_messages(
    history: &[ChatMessage],
    prompt: &str,
    system_message: Option<&str>,
) -> Vec<ChatMessage> {
    let system = match system_message {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_SYSTEM_MESSAGE,
    };

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system));
    messages.extend_from_slice(history);
    if !prompt.is_empty() {
        messages.push(ChatMessage::user(prompt));
    }
    messages
}

/// 聊天补全服务 trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// 生成回复文本
    async fn chat_completion(
        &self,
        history: &[ChatMessage],
        prompt: &str,
        system_message: Option<&str>,
    ) -> Result<String, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_prepends_default_system_and_appends_prompt() {
        let history = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let messages = assemble_messages(&history, "how are you?", None);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[0].content, DEFAULT_SYSTEM_MESSAGE);
        assert_eq!(messages[1].content, "hi");
        assert_eq!(messages[2].content, "hello");
        assert_eq!(messages[3].role, ChatRole::User);
        assert_eq!(messages[3].content, "how are you?");
    }

    #[test]
    fn assemble_uses_custom_system_and_skips_empty_prompt() {
        let messages = assemble_messages(&[], "", Some("You are a pirate"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "You are a pirate");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("yo")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"yo"}"#);
    }
}
