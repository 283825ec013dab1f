//! API credentials, read once from the environment.

use crate::error::{OppsumError, Result};

/// Process-wide credential store.
///
/// Loaded from the environment once at startup (a `.env` file is honored via
/// `dotenvy` before this runs) and read-only for the process lifetime. Keys
/// are optional at load time; a missing key only errors when an operation
/// actually needs it.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub mistral_api_key: Option<String>,
    pub openai_image_api_key: Option<String>,
}

impl Credentials {
    /// Read all credentials from the environment.
    pub fn from_env() -> Self {
        Self {
            spotify_client_id: read_var("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: read_var("SPOTIFY_CLIENT_SECRET"),
            openai_api_key: read_var("OPENAI_API_KEY"),
            anthropic_api_key: read_var("ANTHROPIC_API_KEY"),
            mistral_api_key: read_var("MISTRAL_API_KEY"),
            openai_image_api_key: read_var("OPENAI_IMAGE_API_KEY"),
        }
    }

    /// Spotify client id and secret, required for any catalog access.
    pub fn spotify(&self) -> Result<(&str, &str)> {
        let id = require(&self.spotify_client_id, "SPOTIFY_CLIENT_ID")?;
        let secret = require(&self.spotify_client_secret, "SPOTIFY_CLIENT_SECRET")?;
        Ok((id, secret))
    }

    /// OpenAI API key, used for the OpenAI summarizer backend and narration.
    pub fn openai(&self) -> Result<&str> {
        require(&self.openai_api_key, "OPENAI_API_KEY")
    }

    /// Anthropic API key for the Claude summarizer backend.
    pub fn anthropic(&self) -> Result<&str> {
        require(&self.anthropic_api_key, "ANTHROPIC_API_KEY")
    }

    /// Mistral API key for the Mistral summarizer backend.
    pub fn mistral(&self) -> Result<&str> {
        require(&self.mistral_api_key, "MISTRAL_API_KEY")
    }

    /// Dedicated image-generation key, separate from the summarizer keys.
    pub fn image(&self) -> Result<&str> {
        require(&self.openai_image_api_key, "OPENAI_IMAGE_API_KEY")
    }
}

/// Read an environment variable, treating empty values as unset.
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| {
        OppsumError::Config(format!(
            "{} is not set. Set it in the environment or in a .env file.",
            name
        ))
    })
}
