//! Chat service orchestrating session persistence.
//!
//! ChatService decides what gets stored for each flow: a new session stores
//! the system prompt, the user prompt, and the reply body under a derived
//! title; a continuation appends the user prompt and the full reply.

use termgpt_types::chat::{ChatMessage, MessageRole, Session};
use termgpt_types::error::RepositoryError;
use termgpt_types::llm::Message;
use tracing::info;

use crate::chat::repository::SessionRepository;
use crate::chat::title::split_title;

/// Orchestrates session lifecycle and transcript persistence.
///
/// Generic over `SessionRepository` to maintain clean architecture
/// (termgpt-core never depends on termgpt-infra).
pub struct ChatService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> ChatService<R> {
    /// Create a new chat service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the session repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // --- Session lifecycle ---

    /// Persist a completed first exchange as a new session.
    ///
    /// Runs only after the completion succeeded, so a failed remote call
    /// leaves no session row behind. The reply's first line becomes the
    /// title; only the body below the blank line is stored as the
    /// assistant message. Returns the derived title.
    pub async fn begin_session(
        &self,
        id: &str,
        system_prompt: &str,
        user_prompt: &str,
        reply: &str,
    ) -> Result<String, RepositoryError> {
        let (title, body) = split_title(reply);
        self.repo.create_session(id).await?;
        self.repo.set_title(id, &title).await?;
        self.repo
            .append_message(id, MessageRole::System, system_prompt)
            .await?;
        self.repo
            .append_message(id, MessageRole::User, user_prompt)
            .await?;
        self.repo
            .append_message(id, MessageRole::Assistant, &body)
            .await?;
        info!(session_id = %id, title = %title, "Session created");
        Ok(title)
    }

    /// Persist a completed exchange onto an existing session.
    ///
    /// Appends the user prompt and the full reply, in that order.
    pub async fn continue_session(
        &self,
        id: &str,
        user_prompt: &str,
        reply: &str,
    ) -> Result<(), RepositoryError> {
        self.repo
            .append_message(id, MessageRole::User, user_prompt)
            .await?;
        self.repo
            .append_message(id, MessageRole::Assistant, reply)
            .await?;
        info!(session_id = %id, "Session continued");
        Ok(())
    }

    /// Delete a session and its transcript.
    pub async fn delete_session(&self, id: &str) -> Result<(), RepositoryError> {
        self.repo.delete_session(id).await?;
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    // --- Reads ---

    /// Rebuild the provider conversation from a stored transcript.
    pub async fn conversation(&self, id: &str) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.repo.get_messages(id).await?;
        Ok(messages
            .into_iter()
            .map(|m| Message {
                role: m.role,
                content: m.content,
            })
            .collect())
    }

    /// Get the stored transcript for display.
    pub async fn transcript(&self, id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.repo.get_messages(id).await
    }

    /// List all sessions in insertion order.
    pub async fn sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        self.repo.list_sessions().await
    }

    /// True when a session with this id exists.
    pub async fn session_exists(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.repo.get_session(id).await?.is_some())
    }

    /// Number of messages stored for a session.
    pub async fn message_count(&self, id: &str) -> Result<u32, RepositoryError> {
        self.repo.count_messages(id).await
    }
}
