use anyhow::Result;
use async_trait::async_trait;
use faqrelay::errors::FaqRelayError;
use faqrelay::providers::ai::AiProvider;
use faqrelay::types::ConversationTurn;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// --- Mock AI Provider ---

/// One recorded call to [`MockAiProvider::generate`].
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub messages: Vec<ConversationTurn>,
    pub max_output_tokens: u32,
}

impl RecordedCall {
    /// The content of the leading system message, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == faqrelay::Role::System)
            .map(|m| m.content.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that answers every call with `response`.
    pub fn always(response: &str) -> Self {
        let provider = Self::new();
        provider.set_default_response(response);
        provider
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// The response used when no keyed response matches.
    pub fn set_default_response(&self, response: &str) {
        *self.default_response.lock().unwrap() = Some(response.to_string());
    }

    /// Makes every subsequent call fail with an API error carrying `detail`.
    pub fn fail_with(&self, detail: &str) {
        *self.failure.lock().unwrap() = Some(detail.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        messages: &[ConversationTurn],
        max_output_tokens: u32,
    ) -> Result<String, FaqRelayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            max_output_tokens,
        });

        if let Some(detail) = self.failure.lock().unwrap().clone() {
            return Err(FaqRelayError::AiApi(detail));
        }

        let system_prompt = messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        if let Some(response) = self.default_response.lock().unwrap().clone() {
            return Ok(response);
        }

        Err(FaqRelayError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

// --- Client Configuration Fixtures ---

pub const GYM_HOURS_QUESTION: &str = "what are your hours";
pub const GYM_HOURS_ANSWER: &str = "We're open 6am-9pm daily.";
pub const GYM_FALLBACK: &str = "I don't have that info yet. Please ask at the front desk.";
pub const SALON_FALLBACK: &str = "I'm not sure, please call the salon at 555-0100.";

/// The client records used across the test suites.
///
/// - `demo-hair-salon`: full record with an FAQ file.
/// - `demo-gym`: FAQ file with the hours question.
/// - `demo-bakery`: no FAQ file, answered in open mode.
/// - `demo-broken`: FAQ file that is not valid JSON.
/// - `demo-lost`: FAQ file that does not exist.
pub fn sample_clients() -> Vec<Value> {
    vec![
        json!({
            "id": "demo-hair-salon",
            "name": "Shear Bliss Salon",
            "tone": "warm",
            "allowedTopics": ["haircuts", "coloring", "booking"],
            "fallbackMessage": SALON_FALLBACK,
            "openingMessage": "Hi! Looking for a fresh look?",
            "faqFile": "faqs/demo-hair-salon.json",
            "suggestedQuestions": ["Do you take walk-ins?", "How much is a haircut?"],
            "brandColor": "#c2185b"
        }),
        json!({
            "id": "demo-gym",
            "name": "Iron Peak Gym",
            "tone": "energetic",
            "allowedTopics": ["memberships", "classes", "hours"],
            "fallbackMessage": GYM_FALLBACK,
            "faqFile": "faqs/demo-gym.json"
        }),
        json!({
            "id": "demo-bakery",
            "name": "Crumb & Co"
        }),
        json!({
            "id": "demo-broken",
            "name": "Broken Bikes",
            "faqFile": "faqs/broken.json"
        }),
        json!({
            "id": "demo-lost",
            "name": "Lost & Found",
            "faqFile": "faqs/does-not-exist.json"
        }),
    ]
}

/// The on-disk layout of the client configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigShape {
    /// A JSON object keyed by client id.
    Keyed,
    /// A JSON array of records with an `id` field.
    Sequence,
}

/// A temporary directory holding `client-config.json` and the FAQ files.
pub struct ClientFixture {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl ClientFixture {
    /// Writes the sample clients and their FAQ files in the given shape.
    pub fn new(shape: ConfigShape) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let faq_dir = dir.path().join("faqs");
        fs::create_dir_all(&faq_dir)?;

        write_json(
            &faq_dir.join("demo-gym.json"),
            &json!([
                {"q": GYM_HOURS_QUESTION, "a": GYM_HOURS_ANSWER},
                {"q": "how much is a membership", "a": "Memberships start at $29/month."},
                {"q": "do you have showers", "a": "Yes, with free towels."}
            ]),
        )?;
        write_json(
            &faq_dir.join("demo-hair-salon.json"),
            &json!([
                {"q": "do you take walk-ins", "a": "Yes, whenever a stylist is free."},
                {"q": "how much is a haircut", "a": "Haircuts start at $35."}
            ]),
        )?;
        fs::write(faq_dir.join("broken.json"), "{ this is not json")?;

        let clients = sample_clients();
        let config = match shape {
            ConfigShape::Sequence => Value::Array(clients),
            ConfigShape::Keyed => Value::Object(
                clients
                    .into_iter()
                    .map(|c| (c["id"].as_str().unwrap_or_default().to_string(), c))
                    .collect(),
            ),
        };
        let config_path = dir.path().join("client-config.json");
        write_json(&config_path, &config)?;

        Ok(Self { dir, config_path })
    }

    pub fn base_dir(&self) -> &Path {
        self.dir.path()
    }
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
