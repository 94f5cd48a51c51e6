//! LLM provider implementations.

pub mod openai;
pub mod streaming;
