//! Shared application state for CLI commands.

use std::path::PathBuf;

use termgpt_core::chat::service::ChatService;
use termgpt_infra::config::TomlConfigStore;
use termgpt_infra::paths::database_url;
use termgpt_infra::sqlite::pool::DatabasePool;
use termgpt_infra::sqlite::session::SqliteSessionRepository;

/// The concrete chat service used by the binary.
pub type ConcreteChatService = ChatService<SqliteSessionRepository>;

/// Everything a command handler needs.
pub struct AppState {
    pub service: ConcreteChatService,
    pub config: TomlConfigStore,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Open the database under `data_dir` and wire up the service layer.
    ///
    /// The config store is built by `main` before this runs, because the
    /// logging setup needs the persisted record first.
    pub async fn init(data_dir: PathBuf, config: TomlConfigStore) -> anyhow::Result<Self> {
        let pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let service = ChatService::new(SqliteSessionRepository::new(pool));

        Ok(Self {
            service,
            config,
            data_dir,
        })
    }
}
