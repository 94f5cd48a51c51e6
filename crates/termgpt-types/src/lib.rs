//! Shared domain types for termgpt.
//!
//! This crate contains the domain types used across the termgpt workspace:
//! sessions, transcript messages, the configuration record, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
