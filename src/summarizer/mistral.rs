//! Mistral summarizer backend.

use super::{build_prompt, Backend, Summarizer};
use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, instrument};

const DEFAULT_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage>,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Summarizer backed by the Mistral chat completions API.
///
/// Single-turn request with model-default sampling.
pub struct MistralSummarizer {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl MistralSummarizer {
    /// Create a summarizer for the given API key and model.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: model.to_string(),
        }
    }

    /// Override the API endpoint (used by tests).
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }
}

#[async_trait]
impl Summarizer for MistralSummarizer {
    #[instrument(skip(self, description))]
    async fn summarize(&self, description: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![RequestMessage {
                role: "user",
                content: build_prompt(description),
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!("Mistral API request failed: {}", e);
                OppsumError::Summarize(format!("Mistral API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Mistral API error ({}): {}", status, body);
            return Err(OppsumError::Summarize(format!(
                "Mistral API error ({}): {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Mistral response: {}", e);
            OppsumError::Summarize(format!("Failed to parse Mistral response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OppsumError::Summarize("Empty response from Mistral".to_string()))
    }

    fn backend(&self) -> Backend {
        Backend::Mistral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::CLOSING_SENTENCE;
    use crate::test_support::spawn_mock_server;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_summarize_returns_first_choice_unmodified() {
        let text = "\tMistral summary. ";
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || async move {
                Json(json!({
                    "id": "cmpl-1",
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
                }))
            }),
        );
        let base = spawn_mock_server(app).await;

        let summarizer = MistralSummarizer::new("key", "mistral-large-latest")
            .with_api_url(&format!("{}/v1/chat/completions", base));
        let summary = summarizer.summarize("desc").await.unwrap();
        assert_eq!(summary, text);
    }

    #[tokio::test]
    async fn test_request_carries_prompt() {
        let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let sink = captured.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({
                        "choices": [{"message": {"role": "assistant", "content": "ok"}}]
                    }))
                }
            }),
        );
        let base = spawn_mock_server(app).await;

        let description = "An episode about glaciers.";
        let summarizer = MistralSummarizer::new("key", "mistral-large-latest")
            .with_api_url(&format!("{}/v1/chat/completions", base));
        summarizer.summarize(description).await.unwrap();

        let body = captured.lock().unwrap().take().unwrap();
        let prompt = body["messages"][0]["content"].as_str().unwrap();
        assert!(prompt.contains(description));
        assert!(prompt.contains(CLOSING_SENTENCE));
        assert_eq!(body["model"].as_str().unwrap(), "mistral-large-latest");
    }
}
