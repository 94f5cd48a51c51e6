//! SessionRepository trait definition.
//!
//! Provides CRUD operations for chat sessions and their transcripts.

use termgpt_types::chat::{ChatMessage, MessageRole, Session};
use termgpt_types::error::RepositoryError;

/// Repository trait for session and transcript persistence.
///
/// Implementations live in termgpt-infra (e.g., `SqliteSessionRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionRepository: Send + Sync {
    /// Create a new session row with no title.
    fn create_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by its id.
    fn get_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List all sessions in insertion order.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Set a session's title.
    fn set_title(
        &self,
        id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session and its transcript.
    fn delete_session(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a message to the end of a session's transcript.
    fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session's transcript in insertion order.
    fn get_messages(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Get the number of messages in a session's transcript.
    fn count_messages(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;
}
