//! # FAQ Chatbot Relay
//!
//! This crate answers chat messages on behalf of many businesses ("clients").
//! Each message is first checked against the client's FAQ; if a stored question
//! is literally present the stored answer is returned. Otherwise the message,
//! the conversation so far, and a client-specific system prompt are forwarded
//! to a completion provider.

pub mod chat;
pub mod constants;
pub mod errors;
pub mod faq;
pub mod gateway;
pub mod matcher;
pub mod prompts;
pub mod providers;
pub mod registry;
pub mod types;

pub use chat::{ChatBot, ChatBotBuilder};
pub use errors::FaqRelayError;
pub use faq::FaqStore;
pub use registry::ClientRegistry;
pub use types::{
    ChatRequest, ChatResponse, ClientRecord, ClientSettings, ConversationTurn, EffectiveClient,
    FaqPair, HistoryRole, HistoryTurn, Role,
};
