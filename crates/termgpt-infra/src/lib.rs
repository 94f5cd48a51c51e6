//! Infrastructure layer for termgpt.
//!
//! Contains implementations of the traits defined in `termgpt-core`:
//! SQLite session storage, the TOML configuration store, and the
//! OpenAI-compatible completion provider.

pub mod config;
pub mod llm;
pub mod paths;
pub mod sqlite;
