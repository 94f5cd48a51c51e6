use thiserror::Error;

/// Errors from repository operations (used by trait definitions in termgpt-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("session not found")]
    NotFound,
}

/// Errors from configuration store operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(String),

    #[error("config parse error: {0}")]
    Parse(String),
}
