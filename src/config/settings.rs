//! Configuration settings for Oppsum.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub catalog: CatalogSettings,
    pub summarizer: SummarizerSettings,
    pub narration: NarrationSettings,
    pub thumbnail: ThumbnailSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where generated artifacts are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Media catalog (Spotify) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Market code sent with episode lookups.
    pub market: String,
    /// OAuth2 client-credentials token endpoint.
    pub token_url: String,
    /// Base URL for the catalog API.
    pub api_base_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            market: "US".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_base_url: "https://api.spotify.com/v1".to_string(),
        }
    }
}

/// Summarizer backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Model for the OpenAI backend.
    pub openai_model: String,
    /// Model for the Claude backend.
    pub claude_model: String,
    /// Model for the Mistral backend.
    pub mistral_model: String,
    /// Sampling temperature for the Claude backend.
    pub claude_temperature: f32,
    /// Output token ceiling for the Claude backend.
    pub claude_max_tokens: u32,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            openai_model: "gpt-3.5-turbo".to_string(),
            claude_model: "claude-3-sonnet-20240229".to_string(),
            mistral_model: "mistral-large-latest".to_string(),
            claude_temperature: 0.7,
            claude_max_tokens: 1000,
        }
    }
}

/// Narration (text-to-speech) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationSettings {
    /// Text-to-speech model.
    pub model: String,
    /// Output filename for the audio artifact.
    pub output_file: String,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            output_file: "summary.mp3".to_string(),
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// Image-generation model.
    pub model: String,
    /// Output filename for the image artifact.
    pub output_file: String,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            output_file: "summary_thumbnail.png".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::OppsumError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("oppsum")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Resolve an artifact path inside the output directory.
    ///
    /// When a run id is given it is inserted before the file extension, so
    /// repeated or concurrent runs do not overwrite each other. Without a
    /// run id the fixed default filename is preserved.
    pub fn artifact_path(&self, file_name: &str, run_id: Option<&str>) -> PathBuf {
        let name = match run_id {
            Some(id) => match file_name.rsplit_once('.') {
                Some((stem, ext)) => format!("{}_{}.{}", stem, id, ext),
                None => format!("{}_{}", file_name, id),
            },
            None => file_name.to_string(),
        };
        self.output_dir().join(name)
    }
}
