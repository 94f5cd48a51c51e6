//! The `new` and `cont` chat flows.
//!
//! Both flows follow the same shape: collect the prompt, call the provider
//! (streaming or blocking per config), render the reply, and persist the
//! exchange only after the completion succeeded. A failed call therefore
//! never leaves a half-written session behind.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use termgpt_core::llm::provider::CompletionProvider;
use termgpt_infra::llm::openai::OpenAiProvider;
use termgpt_types::config::AppConfig;
use termgpt_types::llm::Message;
use uuid::Uuid;

use super::render::{ChatRenderer, LiveRender};
use crate::state::AppState;

/// Build the provider from environment credentials.
fn create_provider() -> anyhow::Result<OpenAiProvider> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map(SecretString::from)
        .context("OPENAI_API_KEY not set. Export it before chatting.")?;

    match std::env::var("OPENAI_BASE_URL") {
        Ok(base_url) => {
            tracing::debug!(%base_url, "using custom API base URL");
            Ok(OpenAiProvider::with_base_url(&api_key, &base_url))
        }
        Err(_) => Ok(OpenAiProvider::new(&api_key)),
    }
}

/// Use the argument when given, otherwise prompt interactively.
fn read_prompt(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(prompt) => Ok(prompt),
        None => {
            let prompt: String = dialoguer::Input::new()
                .with_prompt("Prompt")
                .interact_text()?;
            Ok(prompt)
        }
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run one completion and render the reply.
///
/// Returns `Ok(None)` when the provider call failed; the error has already
/// been printed and nothing should be persisted.
async fn run_completion(
    provider: &OpenAiProvider,
    config: &AppConfig,
    messages: Vec<Message>,
    renderer: &ChatRenderer,
) -> anyhow::Result<Option<String>> {
    let request = config.chat_request(messages);
    let spinner = thinking_spinner();

    if config.stream {
        let mut stream = provider.stream(request);
        let mut live = LiveRender::new();
        let mut stdout = io::stdout();
        let mut reply = String::new();
        let mut first_fragment = true;

        while let Some(fragment) = stream.next().await {
            match fragment {
                Ok(text) => {
                    if first_fragment {
                        spinner.finish_and_clear();
                        first_fragment = false;
                    }
                    reply.push_str(&text);
                    live.update(&mut stdout, renderer, &reply)?;
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    tracing::warn!(error = %e, "streaming completion failed");
                    eprintln!("\n  {} {e}", style("!").red().bold());
                    return Ok(None);
                }
            }
        }
        if first_fragment {
            // Stream ended without yielding anything.
            spinner.finish_and_clear();
        }
        live.finish(&mut stdout, &renderer.render_final(&reply))?;
        Ok(Some(reply))
    } else {
        let result = provider.complete(&request).await;
        spinner.finish_and_clear();
        match result {
            Ok(reply) => {
                let mut stdout = io::stdout();
                write!(stdout, "{}", renderer.render_final(&reply))?;
                stdout.flush()?;
                Ok(Some(reply))
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion failed");
                eprintln!("\n  {} {e}", style("!").red().bold());
                Ok(None)
            }
        }
    }
}

/// Start a new session: one exchange, then persist and activate it.
pub async fn new_session(state: &AppState, prompt: Option<String>) -> anyhow::Result<()> {
    let prompt = read_prompt(prompt)?;
    let config = state.config.read().await;
    let provider = create_provider()?;
    let renderer = ChatRenderer::new();

    let messages = vec![
        Message::system(config.system_prompt.as_str()),
        Message::user(prompt.as_str()),
    ];

    let started = Instant::now();
    let Some(reply) = run_completion(&provider, &config, messages, &renderer).await? else {
        return Ok(());
    };
    let elapsed = started.elapsed();

    let mut id = Uuid::new_v4().to_string();
    id.truncate(8);

    state
        .service
        .begin_session(&id, &config.system_prompt, &prompt, &reply)
        .await?;
    state
        .config
        .update(|c| c.active_session = Some(id.clone()))
        .await?;

    renderer.print_stats_footer(&id, elapsed.as_secs_f64(), &config.model);
    Ok(())
}

/// Continue the active session with one more exchange.
pub async fn continue_session(state: &AppState, prompt: Option<String>) -> anyhow::Result<()> {
    let config = state.config.read().await;

    let Some(id) = config.active_session.clone() else {
        println!(
            "  {} No active session. Start one with {} or pick one with {}.",
            style("i").blue().bold(),
            style("tgpt new").cyan(),
            style("tgpt select").cyan(),
        );
        return Ok(());
    };

    if !state.service.session_exists(&id).await? {
        println!(
            "  {} Active session {} no longer exists. Pick another with {}.",
            style("!").yellow().bold(),
            style(&id).dim(),
            style("tgpt select").cyan(),
        );
        return Ok(());
    }

    let prompt = read_prompt(prompt)?;
    let provider = create_provider()?;
    let renderer = ChatRenderer::new();

    let mut messages = state.service.conversation(&id).await?;
    messages.push(Message::user(prompt.as_str()));

    let started = Instant::now();
    let Some(reply) = run_completion(&provider, &config, messages, &renderer).await? else {
        return Ok(());
    };
    let elapsed = started.elapsed();

    state.service.continue_session(&id, &prompt, &reply).await?;
    renderer.print_stats_footer(&id, elapsed.as_secs_f64(), &config.model);
    Ok(())
}
