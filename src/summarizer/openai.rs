//! OpenAI summarizer backend.

use super::{build_prompt, Backend, Summarizer};
use crate::error::{OppsumError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{error, instrument};

/// Summarizer backed by the OpenAI chat completions API.
///
/// Single-turn request with model-default sampling.
pub struct OpenAiSummarizer {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSummarizer {
    /// Create a summarizer for the given API key and model.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), model)
    }

    /// Create a summarizer from an explicit client configuration.
    pub fn with_config(config: OpenAIConfig, model: &str) -> Self {
        Self {
            client: create_client(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip(self, description))]
    async fn summarize(&self, description: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(build_prompt(description))
                .build()
                .map_err(|e| OppsumError::Summarize(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| OppsumError::Summarize(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            error!("OpenAI API error: {}", e);
            OppsumError::Summarize(format!("OpenAI API error: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .cloned()
            .ok_or_else(|| OppsumError::Summarize("Empty response from OpenAI".to_string()))
    }

    fn backend(&self) -> Backend {
        Backend::OpenAi
    }
}
