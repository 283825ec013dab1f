//! Summarization backends.
//!
//! Three interchangeable language-model providers behind one trait. Backend
//! selection is a tagged enum resolved at a single dispatch point
//! ([`create_summarizer`]); all backends share the same prompt template and
//! return the model's text unprocessed.

mod claude;
mod mistral;
mod openai;

pub use claude::ClaudeSummarizer;
pub use mistral::MistralSummarizer;
pub use openai::OpenAiSummarizer;

use crate::config::{Credentials, SummarizerSettings};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The literal closing sentence every summary is instructed to end with.
///
/// Instructed via the prompt only; presence in the output is best-effort and
/// never verified.
pub const CLOSING_SENTENCE: &str =
    "For the full episode, listen on Spotify and click the link here.";

/// Build the shared summarization prompt.
///
/// Embeds the description verbatim, with no length capping or truncation.
pub fn build_prompt(description: &str) -> String {
    format!(
        "Create a concise and engaging summary of this podcast episode: {}\n\n\
         End the summary with: '{}'",
        description, CLOSING_SENTENCE
    )
}

/// Summarizer backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    Claude,
    Mistral,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Backend::OpenAi),
            "claude" | "anthropic" => Ok(Backend::Claude),
            "mistral" => Ok(Backend::Mistral),
            _ => Err(format!(
                "Unknown backend: {} (expected openai, claude, or mistral)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::OpenAi => write!(f, "openai"),
            Backend::Claude => write!(f, "claude"),
            Backend::Mistral => write!(f, "mistral"),
        }
    }
}

/// Trait for summarization backends.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize an episode description into prose text.
    async fn summarize(&self, description: &str) -> Result<String>;

    /// Which backend this summarizer is.
    fn backend(&self) -> Backend;
}

/// Create the summarizer for the selected backend.
pub fn create_summarizer(
    backend: Backend,
    credentials: &Credentials,
    settings: &SummarizerSettings,
) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match backend {
        Backend::OpenAi => Arc::new(OpenAiSummarizer::new(
            credentials.openai()?,
            &settings.openai_model,
        )),
        Backend::Claude => Arc::new(ClaudeSummarizer::new(
            credentials.anthropic()?,
            &settings.claude_model,
            settings.claude_temperature,
            settings.claude_max_tokens,
        )),
        Backend::Mistral => Arc::new(MistralSummarizer::new(
            credentials.mistral()?,
            &settings.mistral_model,
        )),
    };
    Ok(summarizer)
}
