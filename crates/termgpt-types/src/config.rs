//! Configuration record for termgpt.
//!
//! `AppConfig` represents the single-record `config.toml` in the data
//! directory. All fields have defaults so a missing or partial file still
//! yields a usable record.

use serde::{Deserialize, Serialize};

use crate::llm::{ChatRequest, Message};

/// Default system prompt.
///
/// Pins the reply shape the title derivation relies on: a plain-text title
/// on the first line, a blank line, then the answer.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that lives in a terminal. \
Answer exactly what the prompt asks, with no greetings, apologies, or closing remarks.\n\
Format every reply the same way: the first line is a short plain-text title for the \
conversation (no markdown, no quotes), the second line is blank, and the answer starts \
on the third line.\n\
Keep answers short and to the point. Only when the user explicitly asks for a detailed \
explanation should you give one, then return to being brief.";

/// The persisted configuration record.
///
/// Loaded from `config.toml` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Sampling temperature passed to the model.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default)]
    pub frequency_penalty: f64,

    #[serde(default)]
    pub presence_penalty: f64,

    /// Render fragments as they arrive instead of waiting for the full reply.
    #[serde(default = "default_stream")]
    pub stream: bool,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// System prompt stored as the first message of every new session.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Session id that `cont` and `history` operate on.
    #[serde(default)]
    pub active_session: Option<String>,

    /// Emit info-level logs to stderr (RUST_LOG overrides).
    #[serde(default)]
    pub logging: bool,
}

fn default_app_name() -> String {
    "termgpt".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_top_p() -> f64 {
    1.0
}

fn default_stream() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stream: default_stream(),
            model: default_model(),
            system_prompt: default_system_prompt(),
            active_session: None,
            logging: false,
        }
    }
}

impl AppConfig {
    /// Build a provider request from this record and a message list.
    pub fn chat_request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        }
    }
}
