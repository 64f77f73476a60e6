use crate::{errors::FaqRelayError, providers::ai::AiProvider, types::ConversationTurn};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};
use tracing::debug;

/// The public OpenAI chat completions endpoint.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<ChatCompletionMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChoice {
    message: ChatCompletionReply,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionReply {
    #[serde(default)]
    content: Option<String>,
}

// --- OpenAI Provider implementation ---

/// A provider for OpenAI or any OpenAI-compatible chat completions API
/// (including self-hosted servers).
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FaqRelayError> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FaqRelayError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(
        &self,
        messages: &[ConversationTurn],
        max_output_tokens: u32,
    ) -> Result<String, FaqRelayError> {
        let request_body = ChatCompletionRequest {
            messages: messages
                .iter()
                .map(|turn| ChatCompletionMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
            model: self.model.as_deref(),
            max_tokens: max_output_tokens,
            stream: false,
        };

        debug!(url = %self.api_url, messages = messages.len(), "--> Sending chat completion request");

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(FaqRelayError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(FaqRelayError::AiApi(format!("{status}: {error_text}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(FaqRelayError::AiDeserialization)?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!("<-- Chat completion: {}", &text);

        Ok(text)
    }
}
