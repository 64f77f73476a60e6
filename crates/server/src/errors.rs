use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use faqrelay::FaqRelayError;
use serde_json::json;
use tracing::{error, warn};

/// The `error` text of every 500 response from the chat endpoints.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get response from AI";

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the `faqrelay` library.
    Relay(FaqRelayError),
    /// A request body that could not be parsed.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `FaqRelayError` to `AppError`.
impl From<FaqRelayError> for AppError {
    fn from(err: FaqRelayError) -> Self {
        AppError::Relay(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Relay(FaqRelayError::Validation(message)) => {
                warn!("Rejected chat request: {message}");
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::Relay(FaqRelayError::ClientNotFound(id)) => {
                warn!("Client not found: {id}");
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": format!("Client not found: {id}") }),
                )
            }
            AppError::Relay(err) => {
                // Log the original error for debugging purposes
                error!("FaqRelayError: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": CHAT_FAILURE_MESSAGE, "details": err.to_string() }),
                )
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid request body: {message}") }),
            ),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": CHAT_FAILURE_MESSAGE, "details": err.to_string() }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
