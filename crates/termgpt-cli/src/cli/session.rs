//! Session management CLI commands: select, history, delete.
//!
//! `select` and `delete` run the arrow-key picker over the saved sessions;
//! `history` replays the active session's transcript through the markdown
//! renderer.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use termgpt_types::chat::{MessageRole, Session};

use super::picker::pick_option_interactive;
use super::render::ChatRenderer;
use crate::state::AppState;

/// The picker row for a session: title with the id in parentheses.
fn session_label(session: &Session) -> String {
    format!(
        "{} ({})",
        session.title.as_deref().unwrap_or("(untitled)"),
        session.id
    )
}

/// Pick a saved session with the arrow keys and make it active.
pub async fn select_session(state: &AppState) -> Result<()> {
    let sessions = state.service.sessions().await?;

    if sessions.is_empty() {
        println!(
            "  {} No saved sessions. Start one with {}.",
            style("i").blue().bold(),
            style("tgpt new").cyan()
        );
        return Ok(());
    }

    let labels: Vec<String> = sessions.iter().map(session_label).collect();
    match pick_option_interactive(&labels)? {
        Some(index) => {
            let id = sessions[index].id.clone();
            state
                .config
                .update(|c| c.active_session = Some(id.clone()))
                .await?;
            println!(
                "  {} Active session: {}",
                style("*").cyan().bold(),
                session_label(&sessions[index])
            );
        }
        None => println!("  Cancelled."),
    }

    Ok(())
}

/// Replay the active session's transcript.
pub async fn history(state: &AppState) -> Result<()> {
    let config = state.config.read().await;

    let Some(id) = config.active_session.clone() else {
        println!(
            "  {} No active session. Pick one with {}.",
            style("i").blue().bold(),
            style("tgpt select").cyan()
        );
        return Ok(());
    };

    if !state.service.session_exists(&id).await? {
        println!(
            "  {} Active session {} no longer exists. Pick another with {}.",
            style("!").yellow().bold(),
            style(&id).dim(),
            style("tgpt select").cyan()
        );
        return Ok(());
    }

    let messages = state.service.transcript(&id).await?;
    let renderer = ChatRenderer::new();

    println!();
    for message in &messages {
        match message.role {
            MessageRole::System => {
                // The system prompt is configuration, not conversation.
                continue;
            }
            MessageRole::User => {
                println!("  {} {}", style("You >").green().bold(), message.content);
                println!();
            }
            MessageRole::Assistant => {
                print!("{}", renderer.render_final(&message.content));
                println!();
            }
        }
    }

    Ok(())
}

/// Pick a session with the arrow keys and delete it after confirmation.
pub async fn delete_session(state: &AppState) -> Result<()> {
    let sessions = state.service.sessions().await?;

    if sessions.is_empty() {
        println!("  {} No saved sessions to delete.", style("i").blue().bold());
        return Ok(());
    }

    let labels: Vec<String> = sessions.iter().map(session_label).collect();
    let Some(index) = pick_option_interactive(&labels)? else {
        println!("  Cancelled.");
        return Ok(());
    };

    let session = &sessions[index];
    let title = session
        .title
        .as_deref()
        .unwrap_or("(untitled)")
        .to_string();
    let message_count = state.service.message_count(&session.id).await?;

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete session '{}' ({} messages)?",
            style(&title).red().bold(),
            message_count
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("  Cancelled.");
        return Ok(());
    }

    state.service.delete_session(&session.id).await?;

    let config = state.config.read().await;
    if config.active_session.as_deref() == Some(session.id.as_str()) {
        // Clear the active pointer if it referenced the deleted session.
        state.config.update(|c| c.active_session = None).await?;
    }

    println!("  {} Session '{}' deleted.", style("x").red().bold(), title);

    Ok(())
}
