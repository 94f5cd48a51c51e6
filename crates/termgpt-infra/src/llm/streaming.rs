//! OpenAI SSE stream to fragment adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the plain
//! text fragments defined by [`FragmentStream`] in `termgpt-core`. Each chunk
//! may carry content for several choices; only non-empty deltas are emitted.

use async_openai::types::chat::ChatCompletionResponseStream;
use futures_util::StreamExt;

use termgpt_core::llm::provider::FragmentStream;
use termgpt_types::llm::ProviderError;

/// Map an async-openai [`ChatCompletionResponseStream`] to a [`FragmentStream`].
///
/// The stream ends when the underlying SSE stream ends. Transport errors
/// surface as [`ProviderError::Stream`] and terminate the stream.
pub fn map_fragment_stream(stream: ChatCompletionResponseStream) -> FragmentStream {
    Box::pin(async_stream::try_stream! {
        let mut stream = stream;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| ProviderError::Stream(e.to_string()))?;

            for choice in &chunk.choices {
                if let Some(text) = choice.delta.content.clone() {
                    if !text.is_empty() {
                        yield text;
                    }
                }
            }
        }
    })
}
