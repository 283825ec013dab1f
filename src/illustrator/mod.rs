//! Thumbnail generation.

use crate::error::{OppsumError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Fixed instruction prefixed to the summary to form the image prompt.
pub const PROMPT_PREFIX: &str = "Create a minimal podcast thumbnail based on this summary: ";

/// Trait for thumbnail backends.
#[async_trait]
pub trait Illustrator: Send + Sync {
    /// Generate a thumbnail for the summary and return the written file path.
    async fn illustrate(&self, summary: &str) -> Result<PathBuf>;
}

/// Illustrator backed by the OpenAI images API.
///
/// Requests exactly one square image using the dedicated image API key, then
/// downloads the returned URL with a plain unauthenticated GET and writes the
/// bytes verbatim. The bytes are not validated as a well-formed image.
pub struct DalleIllustrator {
    client: async_openai::Client<OpenAIConfig>,
    http: reqwest::Client,
    model: ImageModel,
    output_path: PathBuf,
}

impl DalleIllustrator {
    /// Create an illustrator for the given API key, model, and output path.
    pub fn new(api_key: &str, model: &str, output_path: PathBuf) -> Self {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), model, output_path)
    }

    /// Create an illustrator from an explicit client configuration.
    pub fn with_config(config: OpenAIConfig, model: &str, output_path: PathBuf) -> Self {
        let model = match model {
            "dall-e-2" => ImageModel::DallE2,
            _ => ImageModel::DallE3,
        };
        Self {
            client: create_client(config),
            http: reqwest::Client::new(),
            model,
            output_path,
        }
    }
}

#[async_trait]
impl Illustrator for DalleIllustrator {
    #[instrument(skip(self, summary))]
    async fn illustrate(&self, summary: &str) -> Result<PathBuf> {
        let prompt = format!("{}{}", PROMPT_PREFIX, summary);

        let request = CreateImageRequestArgs::default()
            .model(self.model.clone())
            .prompt(prompt)
            .n(1)
            .size(ImageSize::S1024x1024)
            .response_format(ImageResponseFormat::Url)
            .build()
            .map_err(|e| OppsumError::Illustrate(e.to_string()))?;

        let response = self.client.images().create(request).await.map_err(|e| {
            error!("Image generation failed: {}", e);
            OppsumError::Illustrate(format!("Image generation failed: {}", e))
        })?;

        let image = response.data.first().ok_or_else(|| {
            OppsumError::Illustrate("Image response contained no images".to_string())
        })?;

        let url = match image.as_ref() {
            Image::Url { url, .. } => url.clone(),
            Image::B64Json { .. } => {
                return Err(OppsumError::Illustrate(
                    "Image response did not contain a URL".to_string(),
                ))
            }
        };

        download_image(&self.http, &url, &self.output_path)
            .await
            .map_err(|e| {
                error!("Thumbnail download failed: {}", e);
                e
            })?;

        info!("Wrote thumbnail to {}", self.output_path.display());
        Ok(self.output_path.clone())
    }
}

/// Download image bytes with a plain GET and write them verbatim.
pub(crate) async fn download_image(
    http: &reqwest::Client,
    url: &str,
    output_path: &Path,
) -> Result<()> {
    let response = http.get(url).send().await?;

    if !response.status().is_success() {
        return Err(OppsumError::Illustrate(format!(
            "image download returned status {}",
            response.status().as_u16()
        )));
    }

    let bytes = response.bytes().await?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, &bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_mock_server;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_download_writes_bytes_verbatim() {
        let payload: &[u8] = b"\x89PNG fake image bytes";
        let app = Router::new().route("/img.png", get(move || async move { payload }));
        let base = spawn_mock_server(app).await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("thumb.png");
        download_image(&reqwest::Client::new(), &format!("{}/img.png", base), &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), payload);
    }

    #[tokio::test]
    async fn test_illustrate_generates_downloads_and_writes() {
        let payload: &[u8] = b"\x89PNG generated thumbnail";
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("summary_thumbnail.png");

        // One server plays both roles: image API and plain file host. Bind
        // first so the generation response can point at its own address.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let image_url = format!("{}/img.png", base);

        let app = Router::new()
            .route(
                "/images/generations",
                post(move || {
                    let url = image_url.clone();
                    async move { Json(json!({"created": 0, "data": [{"url": url}]})) }
                }),
            )
            .route("/img.png", get(move || async move { payload }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let illustrator = DalleIllustrator::with_config(
            OpenAIConfig::new().with_api_key("test").with_api_base(base),
            "dall-e-3",
            output.clone(),
        );

        let path = illustrator.illustrate("A summary.").await.unwrap();
        assert_eq!(path, output);
        assert_eq!(std::fs::read(&path).unwrap(), payload);
    }
}
