use super::{handlers, state::AppState};
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeader, trace::TraceLayer};

/// `Cache-Control` value for the widget's static files.
const STATIC_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, private";

/// Creates the Axum router with all the application routes.
///
/// Anything not matched by an API route is looked up in the static directory,
/// so `/` serves the demo page's `index.html`.
pub fn create_router(app_state: AppState) -> Router {
    let static_files = SetResponseHeader::overriding(
        ServeDir::new(&app_state.config.static_dir),
        header::CACHE_CONTROL,
        HeaderValue::from_static(STATIC_CACHE_CONTROL),
    );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/client-config", get(handlers::client_config_handler))
        .route("/api/client-settings", get(handlers::client_settings_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .route("/chat", post(handlers::demo_chat_handler))
        .fallback_service(static_files)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
