//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The client registry and FAQ files are read once
//! here and never change afterwards.

use crate::config::{AppConfig, ProviderConfig};
use faqrelay::{
    providers::ai::{
        gemini::{gemini_api_url, GeminiProvider},
        openai::{OpenAiProvider, OPENAI_CHAT_COMPLETIONS_URL},
        AiProvider,
    },
    ChatBot, ChatBotBuilder, ClientRegistry, FaqStore,
};
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The chat pipeline, holding the client registry, FAQs and provider.
    pub chat_bot: Arc<ChatBot>,
}

/// Instantiates the completion provider described by the configuration.
pub fn build_ai_provider(provider_config: &ProviderConfig) -> anyhow::Result<Box<dyn AiProvider>> {
    let timeout = provider_config.request_timeout_secs.map(Duration::from_secs);

    let provider: Box<dyn AiProvider> = match provider_config.provider.as_str() {
        "openai" => {
            if provider_config.api_key.is_none() {
                warn!("No API key configured for the openai provider; requests will be rejected.");
            }
            let api_url = provider_config
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            Box::new(OpenAiProvider::new(
                api_url,
                provider_config.api_key.clone(),
                Some(provider_config.model_name.clone()),
                timeout,
            )?)
        }
        "local" => {
            // For local providers, the URL is always required.
            let api_url = provider_config.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for the local provider")
            })?;
            Box::new(OpenAiProvider::new(
                api_url,
                provider_config.api_key.clone(),
                Some(provider_config.model_name.clone()),
                timeout,
            )?)
        }
        "gemini" => {
            let api_key = provider_config
                .api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("api_key is required for the gemini provider"))?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = provider_config
                .api_url
                .clone()
                .unwrap_or_else(|| gemini_api_url(&provider_config.model_name));
            Box::new(GeminiProvider::new(api_url, api_key, timeout)?)
        }
        other => {
            return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
        }
    };

    info!(
        provider = %provider_config.provider,
        model = %provider_config.model_name,
        api_key_present = provider_config.api_key.is_some(),
        "Initialized completion provider."
    );
    Ok(provider)
}

/// Builds the shared application state from the configuration.
///
/// Loads the client registry and every client's FAQ file, and instantiates the
/// configured completion provider.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider = build_ai_provider(&config.provider)?;
    build_app_state_with_provider(config, provider)
}

/// Like [`build_app_state`], but with an already constructed provider.
pub fn build_app_state_with_provider(
    config: AppConfig,
    provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    let registry = ClientRegistry::load(
        &config.client_config_path,
        Some(config.default_client_id.as_str()),
    )?;
    let faqs = FaqStore::load_all(&registry, config.faq_base_dir());

    let chat_bot = ChatBotBuilder::new()
        .registry(registry)
        .faq_store(faqs)
        .ai_provider(provider)
        .max_output_tokens(config.max_output_tokens)
        .build()?;

    Ok(AppState {
        config: Arc::new(config),
        chat_bot: Arc::new(chat_bot),
    })
}
