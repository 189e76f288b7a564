//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the content-generation LLM.
//! It implements the `CompletionService` port from the `core` crate against any
//! OpenAI-compatible chat-completions endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use course_studio_core::ports::{CompletionService, PortError, PortResult};
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, temperature: f32, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            temperature,
            max_tokens,
        }
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Sends the assembled prompt as a single user message.
    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!("Sending {} prompt chars to model {}", prompt.len(), self.model);
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        let text = non_empty_content(content)?;
        info!("Model {} returned {} chars", self.model, text.len());
        Ok(text)
    }
}

/// Classifies endpoint failures into the port's failure reasons.
fn map_openai_error(error: OpenAIError) -> PortError {
    match error {
        OpenAIError::Reqwest(e) => PortError::Transport(e.to_string()),
        OpenAIError::ApiError(api) => {
            let code = api.code.as_deref().unwrap_or_default();
            let kind = api.r#type.as_deref().unwrap_or_default();
            if code == "invalid_api_key" || kind.contains("authentication") {
                PortError::Unauthorized(api.message)
            } else {
                PortError::Unexpected(api.message)
            }
        }
        other => PortError::Unexpected(other.to_string()),
    }
}

/// A reply with no text, or only whitespace, counts as a failure.
fn non_empty_content(content: Option<String>) -> PortResult<String> {
    match content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(PortError::EmptyResponse),
    }
}
