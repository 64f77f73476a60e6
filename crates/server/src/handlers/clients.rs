//! # Client Inspection Handlers
//!
//! Read-only views of the client registry for the widget: the full record and
//! the normalized settings subset.

use super::{AppError, AppState};
use crate::types::ClientQuery;
use axum::{
    extract::{Query, State},
    Json,
};
use faqrelay::{ClientRecord, ClientSettings, EffectiveClient};
use tracing::info;

/// `GET /api/client-config`: the client's configuration record as loaded.
///
/// Unknown keys are echoed unchanged. A `faqSource` key comes back as
/// `faqFile`, and records from a keyed file carry their key as `id`.
pub async fn client_config_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<ClientRecord>, AppError> {
    info!(client_id = ?query.client_id, "Client config requested.");
    let record = app_state.chat_bot.resolve_client(query.requested_id())?;
    Ok(Json(record.clone()))
}

/// `GET /api/client-settings`: the public settings with all defaults applied.
///
/// `id` echoes the requested client id, or the default tenant's id when none
/// was given.
pub async fn client_settings_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<ClientSettings>, AppError> {
    let record = app_state.chat_bot.resolve_client(query.requested_id())?;
    let requested_id = query.requested_id().unwrap_or(&record.id);
    let settings = EffectiveClient::from_record(record).settings(requested_id);
    Ok(Json(settings))
}
