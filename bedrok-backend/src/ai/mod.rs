pub mod critique;
pub mod groq;

pub use critique::{SYSTEM_PROMPT, critique_messages};
pub use groq::GroqClient;

use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Failure of a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    Transport(String),
    Api { status: u16, message: String },
    Parse(String),
    /// No choices, or only whitespace in the first one
    EmptyResponse,
    /// Client could not be built (e.g. API key not a valid header value)
    InvalidConfig(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(e) => write!(f, "Request failed: {}", e),
            CompletionError::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            CompletionError::Parse(e) => write!(f, "Failed to parse response: {}", e),
            CompletionError::EmptyResponse => write!(f, "Empty response from model"),
            CompletionError::InvalidConfig(e) => write!(f, "Invalid client configuration: {}", e),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Turns post text into a short fallacy critique.
#[async_trait]
pub trait CritiqueGenerator: Send + Sync {
    async fn critique(&self, post_text: &str) -> Result<String, CompletionError>;
}
