use serde::{Deserialize, Serialize};

/// Query string of the client inspection endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct ClientQuery {
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
}

impl ClientQuery {
    /// The requested id, with an empty `clientId=` treated as absent.
    pub fn requested_id(&self) -> Option<&str> {
        self.client_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// The body of the demo `/chat` route.
#[derive(Debug, Deserialize, Default)]
pub struct DemoChatRequest {
    #[serde(default)]
    pub message: String,
}

/// The reply of the demo `/chat` route.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoChatResponse {
    pub answer: String,
}
