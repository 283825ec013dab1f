//! Claude (Anthropic) summarizer backend.

use super::{build_prompt, Backend, Summarizer};
use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, instrument};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Summarizer backed by the Anthropic Messages API.
///
/// Single-turn request with an explicit moderate temperature and an output
/// token ceiling, per the backend defaults in
/// [`crate::config::SummarizerSettings`].
pub struct ClaudeSummarizer {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ClaudeSummarizer {
    /// Create a summarizer for the given API key and model.
    pub fn new(api_key: &str, model: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: model.to_string(),
            temperature,
            max_tokens,
        }
    }

    /// Override the API endpoint (used by tests).
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }
}

#[async_trait]
impl Summarizer for ClaudeSummarizer {
    #[instrument(skip(self, description))]
    async fn summarize(&self, description: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: build_prompt(description),
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!("Claude API request failed: {}", e);
                OppsumError::Summarize(format!("Claude API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Claude API error ({}): {}", status, body);
            return Err(OppsumError::Summarize(format!(
                "Claude API error ({}): {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Claude response: {}", e);
            OppsumError::Summarize(format!("Failed to parse Claude response: {}", e))
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| OppsumError::Summarize("Empty response from Claude".to_string()))
    }

    fn backend(&self) -> Backend {
        Backend::Claude
    }
}
