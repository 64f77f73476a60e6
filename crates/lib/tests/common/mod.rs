#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the library integration tests: tracing, and a `ChatBot`
//! wired to the on-disk client fixtures and a mock provider.

use faqrelay::{ChatBot, ChatBotBuilder, ClientRegistry, FaqStore};
use faqrelay_test_utils::{ClientFixture, ConfigShape, MockAiProvider};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A `ChatBot` over the sample clients, plus handles for assertions.
pub struct TestBot {
    pub bot: ChatBot,
    pub provider: MockAiProvider,
    pub fixture: ClientFixture,
}

impl TestBot {
    pub fn new(provider: MockAiProvider) -> Self {
        Self::with_shape(provider, ConfigShape::Sequence, Some("demo-hair-salon"))
    }

    pub fn with_shape(
        provider: MockAiProvider,
        shape: ConfigShape,
        default_client_id: Option<&str>,
    ) -> Self {
        setup_tracing();
        let fixture = ClientFixture::new(shape).expect("Failed to write client fixtures");
        let registry = ClientRegistry::load(&fixture.config_path, default_client_id)
            .expect("Failed to load client registry");
        let faqs = FaqStore::load_all(&registry, fixture.base_dir());
        let bot = ChatBotBuilder::new()
            .registry(registry)
            .faq_store(faqs)
            .ai_provider(Box::new(provider.clone()))
            .build()
            .expect("Failed to build ChatBot");
        Self {
            bot,
            provider,
            fixture,
        }
    }
}
