//! Command and reply models for the cache console
//!
//! Commands are parsed from text lines; replies are serialized as JSON.

pub mod commands;
pub mod replies;

// Re-export commonly used types
pub use commands::{Command, MAX_KEY_LENGTH};
pub use replies::Reply;
