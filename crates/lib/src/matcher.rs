//! # Direct FAQ Matching
//!
//! Answers a message straight from the FAQ when a stored question is literally
//! present in it, without calling the model.

use crate::types::FaqPair;

/// Returns the answer of the first FAQ pair whose question matches `message`.
///
/// Both sides are lowercased. A pair matches when its question equals the
/// message or is contained in it. Pairs are checked in stored order.
pub fn find_direct_match<'a>(message: &str, pairs: &'a [FaqPair]) -> Option<&'a str> {
    let folded_message = message.to_lowercase();
    pairs
        .iter()
        .find(|pair| {
            let folded_question = pair.q.to_lowercase();
            folded_question == folded_message || folded_message.contains(&folded_question)
        })
        .map(|pair| pair.a.as_str())
}
