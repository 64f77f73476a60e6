//! # Shared Constants
//!
//! Defaults applied to client records and the fixed strings returned by the
//! chat pipeline. Kept in one place so the server and the tests agree on them.

/// Display name used when a client record has no `name`.
pub const DEFAULT_CLIENT_NAME: &str = "this business";

/// Tone used when a client record has no `tone`.
pub const DEFAULT_TONE: &str = "friendly";

/// Reply the model is told to use when a question is not covered.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "I'm not sure about that yet.";

/// Greeting used when a client has neither `openingMessage` nor `fallbackMessage`.
pub const DEFAULT_OPENING_MESSAGE: &str = "Hello! I'm here to help answer your questions.";

/// Topic phrase used in open mode when `allowedTopics` is empty.
pub const DEFAULT_TOPICS_PHRASE: &str = "general questions about the business";

/// Returned in place of an empty completion.
pub const EMPTY_COMPLETION_APOLOGY: &str =
    "I apologize, but I was unable to generate a response. Please try asking your question again.";

/// Error text for a chat request without a usable message.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Output ceiling for a single completion.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
