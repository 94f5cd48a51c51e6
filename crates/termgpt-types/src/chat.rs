//! Chat session and transcript types for termgpt.
//!
//! These types model persisted conversations: the session row and the
//! role-tagged messages that make up its transcript.

use serde::{Deserialize, Serialize};

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// A persisted chat session.
///
/// `title` stays NULL until the first assistant reply supplies one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: Option<String>,
}

/// A single message within a session transcript.
///
/// Messages are ordered by `id` within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
}
