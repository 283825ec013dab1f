//! Text-to-speech narration.

use crate::error::{OppsumError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, Voice};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Trait for narration backends.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Convert text to speech and return the path of the written audio file.
    async fn narrate(&self, text: &str) -> Result<PathBuf>;
}

/// Narrator backed by the OpenAI speech API.
///
/// Produces a single English MP3 at a fixed path, overwritten on every run.
/// Long text is submitted as-is; no chunking, no voice or rate knobs.
pub struct SpeechNarrator {
    client: async_openai::Client<OpenAIConfig>,
    model: SpeechModel,
    output_path: PathBuf,
}

impl SpeechNarrator {
    /// Create a narrator for the given API key, model, and output path.
    pub fn new(api_key: &str, model: &str, output_path: PathBuf) -> Self {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), model, output_path)
    }

    /// Create a narrator from an explicit client configuration.
    pub fn with_config(config: OpenAIConfig, model: &str, output_path: PathBuf) -> Self {
        let model = match model {
            "tts-1-hd" => SpeechModel::Tts1Hd,
            _ => SpeechModel::Tts1,
        };
        Self {
            client: create_client(config),
            model,
            output_path,
        }
    }
}

#[async_trait]
impl Narrator for SpeechNarrator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn narrate(&self, text: &str) -> Result<PathBuf> {
        let request = CreateSpeechRequestArgs::default()
            .model(self.model.clone())
            .voice(Voice::Alloy)
            .input(text)
            .build()
            .map_err(|e| OppsumError::Narrate(e.to_string()))?;

        let response = self.client.audio().speech(request).await.map_err(|e| {
            error!("Speech API error: {}", e);
            OppsumError::Narrate(format!("Speech API error: {}", e))
        })?;

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        response.save(&self.output_path).await.map_err(|e| {
            error!("Failed to write audio file: {}", e);
            OppsumError::Narrate(format!("Failed to write audio file: {}", e))
        })?;

        info!("Wrote narration to {}", self.output_path.display());
        Ok(self.output_path.clone())
    }
}
