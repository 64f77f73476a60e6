//! External capabilities consumed by the chat pipeline.

pub mod ai;
