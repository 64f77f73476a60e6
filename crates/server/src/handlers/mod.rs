//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `faqrelay-server`.
//! The handlers are split into logical sub-modules based on their functionality.

pub mod chat;
pub mod clients;
pub mod general;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use chat::*;
pub use clients::*;
pub use general::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
