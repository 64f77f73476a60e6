//! # Completion Gateway
//!
//! The only place the chat pipeline talks to the completion provider.

use crate::{
    constants::{DEFAULT_MAX_OUTPUT_TOKENS, EMPTY_COMPLETION_APOLOGY},
    errors::FaqRelayError,
    providers::ai::AiProvider,
    types::{ConversationTurn, HistoryTurn},
};
use tracing::{debug, warn};

/// Sends a composed prompt plus conversation to the provider and normalizes
/// the result. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct CompletionGateway {
    provider: Box<dyn AiProvider>,
    max_output_tokens: u32,
}

impl CompletionGateway {
    pub fn new(provider: Box<dyn AiProvider>, max_output_tokens: u32) -> Self {
        Self {
            provider,
            max_output_tokens,
        }
    }

    pub fn with_default_limit(provider: Box<dyn AiProvider>) -> Self {
        Self::new(provider, DEFAULT_MAX_OUTPUT_TOKENS)
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// The exact message sequence sent to the provider: system prompt, the
    /// history in order, then the new message.
    pub fn build_messages(
        system_prompt: &str,
        history: &[HistoryTurn],
        message: &str,
    ) -> Vec<ConversationTurn> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ConversationTurn::system(system_prompt));
        messages.extend(history.iter().cloned().map(ConversationTurn::from));
        messages.push(ConversationTurn::user(message));
        messages
    }

    /// Returns the trimmed completion, or a fixed apology when the provider
    /// answered with nothing. Provider failures are returned unchanged and
    /// never retried.
    pub async fn complete(
        &self,
        system_prompt: &str,
        history: &[HistoryTurn],
        message: &str,
    ) -> Result<String, FaqRelayError> {
        let messages = Self::build_messages(system_prompt, history, message);
        debug!(
            history = history.len(),
            max_output_tokens = self.max_output_tokens,
            "Requesting completion."
        );

        let raw = self
            .provider
            .generate(&messages, self.max_output_tokens)
            .await?;

        let answer = raw.trim();
        if answer.is_empty() {
            warn!("Provider returned an empty completion.");
            return Ok(EMPTY_COMPLETION_APOLOGY.to_string());
        }
        Ok(answer.to_string())
    }
}
