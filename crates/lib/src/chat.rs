//! # Chat Orchestrator
//!
//! Runs one chat request through the pipeline: validate, resolve the client,
//! load its FAQ, try a direct FAQ answer, and otherwise ask the model with a
//! composed system prompt.

use crate::{
    constants::{DEFAULT_MAX_OUTPUT_TOKENS, MESSAGE_REQUIRED},
    errors::FaqRelayError,
    faq::FaqStore,
    gateway::CompletionGateway,
    matcher::find_direct_match,
    prompts::compose_system_prompt,
    providers::ai::AiProvider,
    registry::ClientRegistry,
    types::{ChatRequest, ChatResponse, ClientRecord, EffectiveClient},
};
use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

/// The chat pipeline. Cheap to clone; all shared data is immutable.
#[derive(Clone)]
pub struct ChatBot {
    pub(crate) registry: Arc<ClientRegistry>,
    pub(crate) faqs: Arc<FaqStore>,
    pub(crate) gateway: CompletionGateway,
}

impl fmt::Debug for ChatBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatBot")
            .field("clients", &self.registry.len())
            .field("max_output_tokens", &self.gateway.max_output_tokens())
            .finish_non_exhaustive()
    }
}

impl ChatBot {
    /// Resolves a client for the inspection endpoints. Fails with
    /// `ClientNotFound` when neither the id nor a default tenant exists.
    pub fn resolve_client(&self, client_id: Option<&str>) -> Result<&ClientRecord, FaqRelayError> {
        self.registry.resolve(client_id)
    }

    /// Handles one chat request.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, FaqRelayError> {
        let message = request.message.as_str();
        if message.trim().is_empty() {
            return Err(FaqRelayError::Validation(MESSAGE_REQUIRED.to_string()));
        }

        let client = match self.registry.resolve(request.client_id.as_deref()) {
            Ok(record) => EffectiveClient::from_record(record),
            Err(e) => {
                warn!(error = %e, "No client resolved; using the generic assistant.");
                EffectiveClient::generic()
            }
        };
        info!(
            client_id = %client.id,
            history = request.conversation_history.len(),
            "Received chat message."
        );

        let pairs = if client.id.is_empty() {
            Arc::new(Vec::new())
        } else {
            self.faqs.pairs_for(&client.id)?
        };

        if let Some(answer) = find_direct_match(message, &pairs) {
            info!(client_id = %client.id, "Answered from FAQ without calling the model.");
            return Ok(ChatResponse::now(answer));
        }

        let system_prompt = compose_system_prompt(&client, &pairs);
        debug!(system_prompt = %system_prompt, "Composed system prompt.");

        let answer = self
            .gateway
            .complete(&system_prompt, &request.conversation_history, message)
            .await?;

        Ok(ChatResponse::now(answer))
    }
}

/// A builder for creating `ChatBot` instances.
#[derive(Default)]
pub struct ChatBotBuilder {
    registry: Option<Arc<ClientRegistry>>,
    faqs: Option<Arc<FaqStore>>,
    ai_provider: Option<Box<dyn AiProvider>>,
    max_output_tokens: Option<u32>,
}

impl ChatBotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(mut self, registry: ClientRegistry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    pub fn faq_store(mut self, faqs: FaqStore) -> Self {
        self.faqs = Some(Arc::new(faqs));
        self
    }

    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Builds the `ChatBot`.
    ///
    /// A registry and an AI provider are required. Without an FAQ store every
    /// client is answered in open mode.
    pub fn build(self) -> Result<ChatBot, FaqRelayError> {
        let registry = self.registry.ok_or(FaqRelayError::MissingRegistry)?;
        let provider = self.ai_provider.ok_or(FaqRelayError::MissingAiProvider)?;
        let faqs = self
            .faqs
            .unwrap_or_else(|| Arc::new(FaqStore::default()));
        let max_output_tokens = self.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);

        Ok(ChatBot {
            registry,
            faqs,
            gateway: CompletionGateway::new(provider, max_output_tokens),
        })
    }
}
