//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `termgpt-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reader for SELECTs and
//! writer for mutations.

use sqlx::Row;
use termgpt_core::chat::repository::SessionRepository;
use termgpt_types::chat::{ChatMessage, MessageRole, Session};
use termgpt_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Session.
struct SessionRow {
    id: String,
    title: Option<String>,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
        })
    }

    fn into_session(self) -> Session {
        Session {
            id: self.id,
            title: self.title,
        }
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: i64,
    session_id: String,
    role: String,
    content: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id: self.id,
            session_id: self.session_id,
            role,
            content: self.content,
        })
    }
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn create_session(&self, id: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO session (id, title) VALUES (?, NULL)")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT id, title FROM session WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query("SELECT id, title FROM session ORDER BY rowid ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session());
        }

        Ok(sessions)
    }

    async fn set_title(&self, id: &str, title: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE session SET title = ? WHERE id = ?")
            .bind(title)
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_session(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM session WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO chat (session_id, role, content) VALUES (?, ?, ?)")
            .bind(session_id)
            .bind(role.to_string())
            .bind(content)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, content FROM chat WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn count_messages(&self, session_id: &str) -> Result<u32, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use termgpt_core::chat::service::ChatService;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();

        let found = repo.get_session("ab12cd34").await.unwrap().unwrap();
        assert_eq!(found.id, "ab12cd34");
        assert!(found.title.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_session_returns_none() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let found = repo.get_session("deadbeef").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_session_id_fails() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();
        let result = repo.create_session("ab12cd34").await;
        assert!(matches!(result, Err(RepositoryError::Query(_))));
    }

    #[tokio::test]
    async fn test_list_sessions_insertion_order() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        for id in ["first001", "second02", "third003"] {
            repo.create_session(id).await.unwrap();
        }

        let sessions = repo.list_sessions().await.unwrap();
        let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["first001", "second02", "third003"]);
    }

    #[tokio::test]
    async fn test_set_title() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();
        repo.set_title("ab12cd34", "Rust borrow checker")
            .await
            .unwrap();

        let found = repo.get_session("ab12cd34").await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("Rust borrow checker"));
    }

    #[tokio::test]
    async fn test_set_title_missing_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let result = repo.set_title("deadbeef", "Nope").await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_append_and_get_messages() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();
        repo.append_message("ab12cd34", MessageRole::System, "You are helpful.")
            .await
            .unwrap();
        repo.append_message("ab12cd34", MessageRole::User, "Hello")
            .await
            .unwrap();
        repo.append_message("ab12cd34", MessageRole::Assistant, "Hi there!")
            .await
            .unwrap();

        let messages = repo.get_messages("ab12cd34").await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "Hello");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "Hi there!");
        // Autoincrement ids preserve append order
        assert!(messages[0].id < messages[1].id);
        assert!(messages[1].id < messages[2].id);
    }

    #[tokio::test]
    async fn test_count_messages() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();
        assert_eq!(repo.count_messages("ab12cd34").await.unwrap(), 0);

        repo.append_message("ab12cd34", MessageRole::User, "One")
            .await
            .unwrap();
        repo.append_message("ab12cd34", MessageRole::Assistant, "Two")
            .await
            .unwrap();

        assert_eq!(repo.count_messages("ab12cd34").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_append_to_missing_session_fails() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let result = repo
            .append_message("deadbeef", MessageRole::User, "Hello")
            .await;
        assert!(matches!(result, Err(RepositoryError::Query(_))));
    }

    #[tokio::test]
    async fn test_delete_session_cascades_messages() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        repo.create_session("ab12cd34").await.unwrap();
        repo.append_message("ab12cd34", MessageRole::User, "Hello")
            .await
            .unwrap();
        repo.append_message("ab12cd34", MessageRole::Assistant, "Hi")
            .await
            .unwrap();

        repo.delete_session("ab12cd34").await.unwrap();

        let found = repo.get_session("ab12cd34").await.unwrap();
        assert!(found.is_none());

        let count = repo.count_messages("ab12cd34").await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool);

        let result = repo.delete_session("deadbeef").await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    // -----------------------------------------------------------------------
    // ChatService over the real repository
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_begin_session_persists_title_and_transcript() {
        let pool = test_pool().await;
        let service = ChatService::new(SqliteSessionRepository::new(pool));

        let reply = "Rust lifetimes\n\nLifetimes describe how long references live.";
        let title = service
            .begin_session("ab12cd34", "You are helpful.", "What are lifetimes?", reply)
            .await
            .unwrap();
        assert_eq!(title, "Rust lifetimes");

        let session = service
            .repo()
            .get_session("ab12cd34")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.title.as_deref(), Some("Rust lifetimes"));

        let transcript = service.transcript("ab12cd34").await.unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].role, MessageRole::System);
        assert_eq!(transcript[0].content, "You are helpful.");
        assert_eq!(transcript[1].role, MessageRole::User);
        assert_eq!(transcript[1].content, "What are lifetimes?");
        assert_eq!(transcript[2].role, MessageRole::Assistant);
        // Only the body below the title line is stored
        assert_eq!(
            transcript[2].content,
            "Lifetimes describe how long references live."
        );
    }

    #[tokio::test]
    async fn test_continue_session_appends_in_order() {
        let pool = test_pool().await;
        let service = ChatService::new(SqliteSessionRepository::new(pool));

        service
            .begin_session(
                "ab12cd34",
                "You are helpful.",
                "What are lifetimes?",
                "Rust lifetimes\n\nThey describe reference validity.",
            )
            .await
            .unwrap();

        service
            .continue_session("ab12cd34", "And the borrow checker?", "It enforces them.")
            .await
            .unwrap();

        let transcript = service.transcript("ab12cd34").await.unwrap();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[3].role, MessageRole::User);
        assert_eq!(transcript[3].content, "And the borrow checker?");
        assert_eq!(transcript[4].role, MessageRole::Assistant);
        assert_eq!(transcript[4].content, "It enforces them.");
    }

    #[tokio::test]
    async fn test_conversation_rebuilds_provider_messages() {
        let pool = test_pool().await;
        let service = ChatService::new(SqliteSessionRepository::new(pool));

        service
            .begin_session(
                "ab12cd34",
                "You are helpful.",
                "Hello",
                "Greeting\n\nHi there!",
            )
            .await
            .unwrap();

        let conversation = service.conversation("ab12cd34").await.unwrap();
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation[0].role, MessageRole::System);
        assert_eq!(conversation[2].content, "Hi there!");
    }
}
