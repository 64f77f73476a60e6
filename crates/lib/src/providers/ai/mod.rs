pub mod gemini;
pub mod openai;

use crate::{errors::FaqRelayError, types::ConversationTurn};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an external completion provider.
///
/// Implementations receive the full message sequence (system prompt first,
/// then the conversation, then the new user message) and return the generated
/// text as-is. Empty output is not an error at this level.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a reply for the given messages, producing at most
    /// `max_output_tokens` tokens.
    async fn generate(
        &self,
        messages: &[ConversationTurn],
        max_output_tokens: u32,
    ) -> Result<String, FaqRelayError>;
}

dyn_clone::clone_trait_object!(AiProvider);
