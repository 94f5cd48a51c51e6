//! TOML-backed configuration store.
//!
//! The config file lives next to the database in the data directory. Reads
//! are deliberately forgiving: a missing or malformed file falls back to
//! defaults so the client always starts.

use std::path::{Path, PathBuf};

use termgpt_types::config::AppConfig;
use termgpt_types::error::ConfigError;
use tracing::{debug, warn};

/// Reads and writes [`AppConfig`] as a TOML file at a fixed path.
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure the config file exists, writing defaults if it does not.
    ///
    /// Returns the effective configuration either way.
    pub async fn ensure_exists(&self) -> Result<AppConfig, ConfigError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(self.read().await);
        }
        let config = AppConfig::default();
        self.write(&config).await?;
        debug!(path = %self.path.display(), "wrote default config");
        Ok(config)
    }

    /// Load the configuration, falling back to defaults on any failure.
    pub async fn read(&self) -> AppConfig {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("config file not found, using defaults");
                return AppConfig::default();
            }
            Err(e) => {
                warn!("failed to read config file: {e}, using defaults");
                return AppConfig::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse config file: {e}, using defaults");
                AppConfig::default()
            }
        }
    }

    /// Read, apply `mutate`, and persist the result.
    pub async fn update<F>(&self, mutate: F) -> Result<AppConfig, ConfigError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.read().await;
        mutate(&mut config);
        self.write(&config).await?;
        Ok(config)
    }

    async fn write(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> TomlConfigStore {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        // Keep the tempdir alive for the duration of the test process.
        std::mem::forget(dir);
        TomlConfigStore::new(path)
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_file_with_defaults() {
        let store = test_store();
        assert!(!store.path().exists());

        let config = store.ensure_exists().await.unwrap();

        assert!(store.path().exists());
        assert_eq!(config.model, AppConfig::default().model);
        assert_eq!(config.temperature, AppConfig::default().temperature);
    }

    #[tokio::test]
    async fn test_ensure_exists_keeps_existing_file() {
        let store = test_store();
        store
            .update(|c| c.model = "gpt-4o".to_string())
            .await
            .unwrap();

        let config = store.ensure_exists().await.unwrap();
        assert_eq!(config.model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_read_missing_file_returns_defaults() {
        let store = test_store();
        let config = store.read().await;
        assert_eq!(config.model, AppConfig::default().model);
    }

    #[tokio::test]
    async fn test_read_partial_file_keeps_defaults_for_rest() {
        let store = test_store();
        tokio::fs::write(store.path(), "temperature = 0.5\n")
            .await
            .unwrap();

        let config = store.read().await;
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.model, AppConfig::default().model);
        assert_eq!(config.max_tokens, AppConfig::default().max_tokens);
    }

    #[tokio::test]
    async fn test_read_malformed_file_returns_defaults() {
        let store = test_store();
        tokio::fs::write(store.path(), "this is { not toml")
            .await
            .unwrap();

        let config = store.read().await;
        assert_eq!(config.model, AppConfig::default().model);
    }

    #[tokio::test]
    async fn test_update_persists_active_session() {
        let store = test_store();

        let config = store
            .update(|c| c.active_session = Some("ab3f9c01".to_string()))
            .await
            .unwrap();
        assert_eq!(config.active_session.as_deref(), Some("ab3f9c01"));

        let reread = store.read().await;
        assert_eq!(reread.active_session.as_deref(), Some("ab3f9c01"));

        let cleared = store.update(|c| c.active_session = None).await.unwrap();
        assert!(cleared.active_session.is_none());
        assert!(store.read().await.active_session.is_none());
    }

    #[tokio::test]
    async fn test_update_toggles_logging() {
        let store = test_store();
        assert!(!store.read().await.logging);

        let config = store.update(|c| c.logging = !c.logging).await.unwrap();
        assert!(config.logging);
        assert!(store.read().await.logging);
    }
}
