//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port over the sample client
//! fixtures, with an `httpmock::MockServer` standing in for the
//! OpenAI-compatible completion provider.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use faqrelay::providers::ai::AiProvider;
use faqrelay_server::{
    config, router,
    state::{build_app_state, build_app_state_with_provider, AppState},
};
use faqrelay_test_utils::{ClientFixture, ConfigShape};
use httpmock::MockServer;
use reqwest::Client;
use serde_json::json;
use std::{fs, net::SocketAddr};
use tokio::{net::TcpListener, task::JoinHandle};

pub const INDEX_HTML: &str = "<!doctype html><title>FAQ Bot</title><div id=\"chat-widget\"></div>";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    pub fixture: ClientFixture,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server over a sequence-shaped client config.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(ConfigShape::Sequence, "demo-hair-salon", None).await
    }

    /// Spawns the server with the given config shape and default tenant.
    ///
    /// When `provider` is `None`, a "local" provider pointed at the mock server
    /// is built from the configuration file.
    pub async fn spawn_with(
        shape: ConfigShape,
        default_client_id: &str,
        provider: Option<Box<dyn AiProvider>>,
    ) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let fixture = ClientFixture::new(shape)?;

        let static_dir = fixture.base_dir().join("public");
        fs::create_dir_all(&static_dir)?;
        fs::write(static_dir.join("index.html"), INDEX_HTML)?;

        let config_path = fixture.base_dir().join("config.yml");
        let config_content = format!(
            r#"
port: 0
client_config_path: "{}"
default_client_id: "{}"
demo_client_id: "demo-gym"
static_dir: "{}"
max_output_tokens: 300
provider:
  provider: "local"
  api_url: "{}"
  api_key: null
  model_name: "mock-chat-model"
"#,
            fixture.config_path.display(),
            default_client_id,
            static_dir.display(),
            mock_server.url("/v1/chat/completions")
        );
        fs::write(&config_path, config_content)?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = match provider {
            Some(provider) => build_app_state_with_provider(config, provider)?,
            None => build_app_state(config)?,
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let app = router::create_router(app_state.clone());
        let server_handle = tokio::spawn(async move {
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state,
            fixture,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An OpenAI-style chat completion body carrying `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}
