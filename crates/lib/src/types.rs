use crate::constants::{
    DEFAULT_CLIENT_NAME, DEFAULT_FALLBACK_MESSAGE, DEFAULT_OPENING_MESSAGE, DEFAULT_TONE,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One tenant's configuration exactly as it appears in the client config file.
///
/// Every field except `id` is optional; defaults are applied by
/// [`EffectiveClient::from_record`], never here. Unknown keys are kept in
/// `extra` so the record can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_message: Option<String>,
    #[serde(default, alias = "faqSource", skip_serializing_if = "Option::is_none")]
    pub faq_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_questions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A client record with every documented default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveClient {
    pub id: String,
    pub name: String,
    pub tone: String,
    pub allowed_topics: Vec<String>,
    pub fallback_message: String,
    pub opening_message: String,
    pub faq_file: Option<String>,
    pub suggested_questions: Vec<String>,
}

impl EffectiveClient {
    /// Applies the defaults for absent or empty fields.
    pub fn from_record(record: &ClientRecord) -> Self {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let opening_message = present(&record.opening_message)
            .or_else(|| present(&record.fallback_message))
            .unwrap_or_else(|| DEFAULT_OPENING_MESSAGE.to_string());

        Self {
            id: record.id.clone(),
            name: present(&record.name).unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
            tone: present(&record.tone).unwrap_or_else(|| DEFAULT_TONE.to_string()),
            allowed_topics: record.allowed_topics.clone().unwrap_or_default(),
            fallback_message: present(&record.fallback_message)
                .unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string()),
            opening_message,
            faq_file: present(&record.faq_file),
            suggested_questions: record.suggested_questions.clone().unwrap_or_default(),
        }
    }

    /// The generic assistant persona used when no client can be resolved.
    pub fn generic() -> Self {
        Self::from_record(&ClientRecord::default())
    }

    /// The public subset exposed to the widget.
    pub fn settings(&self, requested_id: &str) -> ClientSettings {
        ClientSettings {
            id: requested_id.to_string(),
            name: self.name.clone(),
            tone: self.tone.clone(),
            opening_message: self.opening_message.clone(),
            allowed_topics: self.allowed_topics.clone(),
            suggested_questions: self.suggested_questions.clone(),
        }
    }
}

/// The normalized settings returned by `GET /api/client-settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub id: String,
    pub name: String,
    pub tone: String,
    pub opening_message: String,
    pub allowed_topics: Vec<String>,
    pub suggested_questions: Vec<String>,
}

/// A single question/answer pair from a client's FAQ file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    pub q: String,
    pub a: String,
}

/// The speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message sent to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The speaker of a caller-supplied history turn. Only the composed system
/// prompt may carry the `system` role, so it is not accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

/// One message in the history the widget echoes back on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<HistoryTurn> for ConversationTurn {
    fn from(turn: HistoryTurn) -> Self {
        let role = match turn.role {
            HistoryRole::User => Role::User,
            HistoryRole::Assistant => Role::Assistant,
        };
        Self {
            role,
            content: turn.content,
        }
    }
}

/// The body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<HistoryTurn>,
}

/// A successful chat answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
}

impl ChatResponse {
    /// Wraps an answer with the current UTC time in ISO-8601 form.
    pub fn now(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
