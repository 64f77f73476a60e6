use thiserror::Error;

/// Custom error types for the FAQ relay.
#[derive(Error, Debug)]
pub enum FaqRelayError {
    #[error("{0}")]
    Validation(String),
    #[error("Client not found: {0}")]
    ClientNotFound(String),
    #[error("Failed to load client configuration: {0}")]
    RegistryLoad(String),
    #[error("Failed to load FAQ for client '{client_id}': {reason}")]
    ConfigLoad { client_id: String, reason: String },
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Client registry is missing")]
    MissingRegistry,
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FaqRelayError {
    /// Whether the error came from talking to the completion provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            FaqRelayError::AiRequest(_)
                | FaqRelayError::AiDeserialization(_)
                | FaqRelayError::AiApi(_)
                | FaqRelayError::ReqwestClientBuild(_)
        )
    }
}
