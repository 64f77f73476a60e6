//! # Prompt Composition
//!
//! Builds the system instruction sent ahead of the conversation. Which template
//! is used depends only on whether the client has any FAQ pairs.

pub mod faq;

use crate::{
    constants::DEFAULT_TOPICS_PHRASE,
    types::{EffectiveClient, FaqPair},
};
use faq::{FAQ_GROUNDED_SYSTEM_PROMPT, OPEN_SYSTEM_PROMPT};

/// Renders FAQ pairs as `Q:`/`A:` blocks separated by a blank line.
pub fn render_faq(pairs: &[FaqPair]) -> String {
    pairs
        .iter()
        .map(|pair| format!("Q: {}\nA: {}", pair.q, pair.a))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Joins the allowed topics, or returns a generic phrase when there are none.
pub fn render_topics(topics: &[String]) -> String {
    let topics: Vec<&str> = topics
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if topics.is_empty() {
        DEFAULT_TOPICS_PHRASE.to_string()
    } else {
        topics.join(", ")
    }
}

/// Builds the system prompt for a client.
pub fn compose_system_prompt(client: &EffectiveClient, pairs: &[FaqPair]) -> String {
    let template = if pairs.is_empty() {
        OPEN_SYSTEM_PROMPT
    } else {
        FAQ_GROUNDED_SYSTEM_PROMPT
    };

    // `{faq}` goes last so FAQ text containing placeholders is left alone.
    template
        .replace("{name}", &client.name)
        .replace("{tone}", &client.tone)
        .replace("{fallback_message}", &client.fallback_message)
        .replace("{topics}", &render_topics(&client.allowed_topics))
        .replace("{faq}", &render_faq(pairs))
}
