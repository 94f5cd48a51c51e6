//! CompletionProvider trait definition.
//!
//! The one abstraction every completion backend implements. Uses RPITIT for
//! `complete` and `Pin<Box<dyn Stream>>` for `stream` so callers can hold
//! the fragment stream without naming the adapter's concrete type.

use std::pin::Pin;

use futures_util::Stream;

use termgpt_types::llm::{ChatRequest, ProviderError};

/// A finite, non-restartable stream of reply text fragments.
pub type FragmentStream =
    Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send + 'static>>;

/// Trait for completion backends (OpenAI-compatible APIs).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) for
/// `complete`. Concatenating the fragments yielded by `stream` produces
/// the same text `complete` would have returned.
///
/// Implementations live in termgpt-infra (e.g., `OpenAiProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full reply text.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<String, ProviderError>> + Send;

    /// Send a streaming completion request. Returns a stream of text fragments.
    fn stream(&self, request: ChatRequest) -> FragmentStream;
}
