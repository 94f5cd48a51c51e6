//! OpenAI chat completion provider.
//!
//! Implements [`CompletionProvider`] on top of [`async_openai`] for type-safe
//! request/response handling and built-in SSE streaming. The base URL is
//! configurable so any OpenAI-compatible endpoint works.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};

use termgpt_core::llm::provider::{CompletionProvider, FragmentStream};
use termgpt_types::llm::{ChatRequest, MessageRole, ProviderError};

use super::streaming::map_fragment_stream;

/// Default OpenAI API base URL.
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-backed completion provider.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    /// Create a provider against the official OpenAI endpoint.
    pub fn new(api_key: &SecretString) -> Self {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    /// Create a provider against any OpenAI-compatible endpoint.
    pub fn with_base_url(api_key: &SecretString, base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
        }
    }
}

/// Build a [`CreateChatCompletionRequest`] from a generic [`ChatRequest`].
fn build_request(request: &ChatRequest, stream: bool) -> CreateChatCompletionRequest {
    let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

    for msg in &request.messages {
        let oai_msg = match msg.role {
            MessageRole::System => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(msg.content.clone()),
                    name: None,
                })
            }
            MessageRole::User => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                    name: None,
                })
            }
            MessageRole::Assistant => {
                #[allow(deprecated)]
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                        msg.content.clone(),
                    )),
                    refusal: None,
                    name: None,
                    audio: None,
                    tool_calls: None,
                    function_call: None,
                })
            }
        };
        messages.push(oai_msg);
    }

    let mut req = CreateChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_completion_tokens: Some(request.max_tokens),
        temperature: Some(request.temperature as f32),
        top_p: Some(request.top_p as f32),
        frequency_penalty: Some(request.frequency_penalty as f32),
        presence_penalty: Some(request.presence_penalty as f32),
        ..Default::default()
    };

    if stream {
        req.stream = Some(true);
    }

    req
}

// OpenAiProvider intentionally does NOT derive Debug to prevent accidental
// exposure of internal state including the API key inside the async-openai
// Client.

impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        let oai_request = build_request(request, false);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        // Extract content from the first choice
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }

    fn stream(&self, request: ChatRequest) -> FragmentStream {
        let oai_request = build_request(&request, true);

        // Clone the client for the 'static stream closure
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            let oai_stream = client
                .chat()
                .create_stream(oai_request)
                .await
                .map_err(map_openai_error)?;

            let mut inner = map_fragment_stream(oai_stream);

            while let Some(fragment) = inner.next().await {
                match fragment {
                    Ok(text) => yield text,
                    Err(e) => Err(e)?,
                }
            }
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`ProviderError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> ProviderError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            // Check for known error types by code or type field
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                ProviderError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                ProviderError::RateLimited
            } else {
                ProviderError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 => ProviderError::AuthenticationFailed,
                    429 => ProviderError::RateLimited,
                    _ => ProviderError::Provider {
                        message: err.to_string(),
                    },
                }
            } else {
                ProviderError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::StreamError(stream_err) => ProviderError::Stream(stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => ProviderError::InvalidRequest(msg.clone()),
        _ => ProviderError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgpt_types::llm::Message;

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                Message::system("Be helpful"),
                Message::user("Hello"),
                Message::assistant("Hi there!"),
            ],
            max_tokens: 1024,
            temperature: 0.5,
            top_p: 0.25,
            frequency_penalty: 0.5,
            presence_penalty: 0.0,
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAiProvider::new(&SecretString::from("sk-test"));
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_build_request_messages() {
        let oai_req = build_request(&test_request(), false);

        assert_eq!(oai_req.model, "gpt-4o-mini");
        // System + user + assistant, in conversation order
        assert_eq!(oai_req.messages.len(), 3);
        assert!(matches!(
            oai_req.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            oai_req.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            oai_req.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn test_build_request_sampling_params() {
        let oai_req = build_request(&test_request(), false);

        assert_eq!(oai_req.max_completion_tokens, Some(1024));
        assert_eq!(oai_req.temperature, Some(0.5));
        assert_eq!(oai_req.top_p, Some(0.25));
        assert_eq!(oai_req.frequency_penalty, Some(0.5));
        assert_eq!(oai_req.presence_penalty, Some(0.0));
    }

    #[test]
    fn test_build_request_streaming() {
        let oai_req = build_request(&test_request(), true);
        assert_eq!(oai_req.stream, Some(true));
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, ProviderError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit exceeded".to_string(),
            r#type: Some("rate_limit_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[test]
    fn test_map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }
}
