//! Business logic and repository trait definitions for termgpt.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `termgpt-types` --
//! never on `termgpt-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
