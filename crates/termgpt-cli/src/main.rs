//! termgpt CLI entry point.
//!
//! Binary name: `tgpt`
//!
//! Parses CLI arguments, loads the configuration record, initializes the
//! database, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use termgpt_infra::config::TomlConfigStore;
use termgpt_infra::paths::{config_path, resolve_data_dir};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir();

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir).await?;

    let config_store = TomlConfigStore::new(config_path(&data_dir));
    let config = config_store.ensure_exists().await?;

    // Set up tracing from the persisted flag; RUST_LOG wins when set
    let default_filter = if config.logging { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Initialize application state (DB, services)
    let state = AppState::init(data_dir, config_store).await?;

    match cli.command {
        Commands::New { prompt } => {
            cli::chat::new_session(&state, prompt).await?;
        }

        Commands::Cont { prompt } => {
            cli::chat::continue_session(&state, prompt).await?;
        }

        Commands::Select => {
            cli::session::select_session(&state).await?;
        }

        Commands::Log => {
            cli::config::toggle_logging(&state).await?;
        }

        Commands::History => {
            cli::session::history(&state).await?;
        }

        Commands::Config => {
            cli::config::show_config(&state).await?;
        }

        Commands::Delete => {
            cli::session::delete_session(&state).await?;
        }
    }

    Ok(())
}
