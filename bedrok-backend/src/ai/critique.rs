//! The Bedrok persona: fixed system instruction and request sampling settings.

use async_trait::async_trait;

use super::{CompletionError, CritiqueGenerator, GroqClient, Message};

pub const SYSTEM_PROMPT: &str = "You are Bedrok, a witty AI who identifies logical fallacies, weak reasoning, \
and inconsistencies in tweets. Respond with a few words naming the logical fallacy, then a sentence of \
explanation. No hashtags. Question everything!";

pub const CRITIQUE_TEMPERATURE: f64 = 0.7;
pub const CRITIQUE_MAX_TOKENS: u32 = 200;

pub fn critique_messages(post_text: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!("Tweet: {}", post_text)),
    ]
}

#[async_trait]
impl CritiqueGenerator for GroqClient {
    async fn critique(&self, post_text: &str) -> Result<String, CompletionError> {
        let critique = self
            .complete(critique_messages(post_text), CRITIQUE_TEMPERATURE, CRITIQUE_MAX_TOKENS)
            .await
            .map_err(|e| {
                log::error!("[AI] Error from completion API: {}", e);
                e
            })?;

        log::debug!("[AI] Critique ({} chars): {}", critique.chars().count(), critique);
        Ok(critique)
    }
}
