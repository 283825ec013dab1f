//! Pipeline driver.
//!
//! Sequences catalog fetch, summarization, narration, and thumbnail
//! generation for one episode. One run executes start to finish; any step
//! failure moves the pipeline to `Failed` and halts the remaining steps.

use crate::catalog::{extract_episode_id, CatalogClient};
use crate::config::{Credentials, Settings};
use crate::error::{OppsumError, Result};
use crate::illustrator::{DalleIllustrator, Illustrator};
use crate::narrator::{Narrator, SpeechNarrator};
use crate::summarizer::{create_summarizer, Backend, Summarizer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// Pipeline lifecycle states.
///
/// Terminal states are not retried; a new run restarts from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Fetching,
    Summarizing,
    Narrating,
    Illustrating,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Fetching => "fetching",
            PipelineState::Summarizing => "summarizing",
            PipelineState::Narrating => "narrating",
            PipelineState::Illustrating => "illustrating",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a completed pipeline run.
#[derive(Debug)]
pub struct RunResult {
    /// Episode identifier extracted from the input.
    pub episode_id: String,
    /// Generated summary text.
    pub summary: String,
    /// Path of the narration audio artifact.
    pub audio_path: PathBuf,
    /// Path of the thumbnail artifact.
    pub thumbnail_path: PathBuf,
}

/// The pipeline driver.
///
/// Owns one instance of each stage; the catalog session is created inside
/// each run, so no mutable authentication state is shared across runs.
pub struct Pipeline {
    catalog: CatalogClient,
    summarizer: Arc<dyn Summarizer>,
    narrator: Arc<dyn Narrator>,
    illustrator: Arc<dyn Illustrator>,
    market: String,
    state: PipelineState,
}

impl Pipeline {
    /// Build a pipeline from settings and credentials.
    ///
    /// Artifact paths honor the optional run id so repeated runs can avoid
    /// overwriting each other; the default fixed names are kept otherwise.
    pub fn new(
        settings: &Settings,
        credentials: &Credentials,
        backend: Backend,
        market: &str,
        run_id: Option<&str>,
    ) -> Result<Self> {
        let (client_id, client_secret) = credentials.spotify()?;
        let catalog = CatalogClient::new(
            client_id,
            client_secret,
            &settings.catalog.token_url,
            &settings.catalog.api_base_url,
        );

        let summarizer = create_summarizer(backend, credentials, &settings.summarizer)?;

        let narrator = Arc::new(SpeechNarrator::new(
            credentials.openai()?,
            &settings.narration.model,
            settings.artifact_path(&settings.narration.output_file, run_id),
        ));

        let illustrator = Arc::new(DalleIllustrator::new(
            credentials.image()?,
            &settings.thumbnail.model,
            settings.artifact_path(&settings.thumbnail.output_file, run_id),
        ));

        Ok(Self::with_components(
            catalog, summarizer, narrator, illustrator, market,
        ))
    }

    /// Build a pipeline from explicit components (used by tests).
    pub fn with_components(
        catalog: CatalogClient,
        summarizer: Arc<dyn Summarizer>,
        narrator: Arc<dyn Narrator>,
        illustrator: Arc<dyn Illustrator>,
        market: &str,
    ) -> Self {
        Self {
            catalog,
            summarizer,
            narrator,
            illustrator,
            market: market.to_string(),
            state: PipelineState::Idle,
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run the full pipeline for one episode URL.
    ///
    /// Empty or whitespace-only input is rejected before any state
    /// transition or network call.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn run(&mut self, input: &str) -> Result<RunResult> {
        self.state = PipelineState::Idle;

        let episode_id = extract_episode_id(input).ok_or_else(|| {
            OppsumError::InvalidInput("Please enter a Spotify episode URL.".to_string())
        })?;

        match self.execute(&episode_id).await {
            Ok(result) => {
                self.state = PipelineState::Done;
                Ok(result)
            }
            Err(e) => {
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, episode_id: &str) -> Result<RunResult> {
        self.state = PipelineState::Fetching;
        info!("Authenticating against the catalog");
        let session = self.catalog.authenticate().await?;

        info!("Fetching description for episode {}", episode_id);
        let description = self
            .catalog
            .fetch_description(&session, episode_id, &self.market)
            .await?;

        self.state = PipelineState::Summarizing;
        info!("Summarizing with the {} backend", self.summarizer.backend());
        let summary = self.summarizer.summarize(&description).await?;

        self.state = PipelineState::Narrating;
        info!("Narrating summary");
        let audio_path = self.narrator.narrate(&summary).await?;

        self.state = PipelineState::Illustrating;
        info!("Generating thumbnail");
        let thumbnail_path = self.illustrator.illustrate(&summary).await?;

        Ok(RunResult {
            episode_id: episode_id.to_string(),
            summary,
            audio_path,
            thumbnail_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_mock_server;
    use async_trait::async_trait;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSummarizer {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(&self, description: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(OppsumError::Summarize("backend unavailable".to_string()));
            }
            Ok(format!("summary of: {}", description))
        }

        fn backend(&self) -> Backend {
            Backend::OpenAi
        }
    }

    struct MockNarrator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Narrator for MockNarrator {
        async fn narrate(&self, _text: &str) -> Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PathBuf::from("summary.mp3"))
        }
    }

    struct MockIllustrator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Illustrator for MockIllustrator {
        async fn illustrate(&self, _summary: &str) -> Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PathBuf::from("summary_thumbnail.png"))
        }
    }

    struct Counters {
        token: Arc<AtomicUsize>,
        fetch: Arc<AtomicUsize>,
        summarize: Arc<AtomicUsize>,
        narrate: Arc<AtomicUsize>,
        illustrate: Arc<AtomicUsize>,
    }

    impl Counters {
        fn new() -> Self {
            Self {
                token: Arc::new(AtomicUsize::new(0)),
                fetch: Arc::new(AtomicUsize::new(0)),
                summarize: Arc::new(AtomicUsize::new(0)),
                narrate: Arc::new(AtomicUsize::new(0)),
                illustrate: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    async fn mock_catalog(counters: &Counters) -> CatalogClient {
        let token = counters.token.clone();
        let fetch = counters.fetch.clone();
        let app = Router::new()
            .route(
                "/api/token",
                post(move || {
                    let token = token.clone();
                    async move {
                        token.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"access_token": "test-token"}))
                    }
                }),
            )
            .route(
                "/episodes/{id}",
                get(move || {
                    let fetch = fetch.clone();
                    async move {
                        fetch.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"description": "An episode about tides."}))
                    }
                }),
            );
        let base = spawn_mock_server(app).await;
        CatalogClient::new("id", "secret", &format!("{}/api/token", base), &base)
    }

    fn pipeline_with(counters: &Counters, catalog: CatalogClient, fail_summarize: bool) -> Pipeline {
        Pipeline::with_components(
            catalog,
            Arc::new(MockSummarizer {
                calls: counters.summarize.clone(),
                fail: fail_summarize,
            }),
            Arc::new(MockNarrator {
                calls: counters.narrate.clone(),
            }),
            Arc::new(MockIllustrator {
                calls: counters.illustrate.clone(),
            }),
            "US",
        )
    }

    #[tokio::test]
    async fn test_full_run_reaches_done_with_one_call_per_stage() {
        let counters = Counters::new();
        let catalog = mock_catalog(&counters).await;
        let mut pipeline = pipeline_with(&counters, catalog, false);

        let result = pipeline
            .run("https://open.spotify.com/episode/abc123")
            .await
            .unwrap();

        assert_eq!(result.episode_id, "abc123");
        assert_eq!(result.summary, "summary of: An episode about tides.");
        assert_eq!(pipeline.state(), PipelineState::Done);
        assert_eq!(counters.token.load(Ordering::SeqCst), 1);
        assert_eq!(counters.fetch.load(Ordering::SeqCst), 1);
        assert_eq!(counters.summarize.load(Ordering::SeqCst), 1);
        assert_eq!(counters.narrate.load(Ordering::SeqCst), 1);
        assert_eq!(counters.illustrate.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_summarizer_failure_skips_narration_and_illustration() {
        let counters = Counters::new();
        let catalog = mock_catalog(&counters).await;
        let mut pipeline = pipeline_with(&counters, catalog, true);

        let err = pipeline
            .run("https://open.spotify.com/episode/abc123")
            .await
            .unwrap_err();

        assert!(matches!(err, OppsumError::Summarize(_)));
        assert_eq!(pipeline.state(), PipelineState::Failed);
        assert_eq!(counters.fetch.load(Ordering::SeqCst), 1);
        assert_eq!(counters.narrate.load(Ordering::SeqCst), 0);
        assert_eq!(counters.illustrate.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_any_call() {
        let counters = Counters::new();
        // Unreachable endpoints prove nothing is called.
        let catalog = CatalogClient::new("id", "secret", "http://127.0.0.1:1/token", "http://127.0.0.1:1");
        let mut pipeline = pipeline_with(&counters, catalog, false);

        let err = pipeline.run("   ").await.unwrap_err();

        assert!(matches!(err, OppsumError::InvalidInput(_)));
        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(counters.summarize.load(Ordering::SeqCst), 0);
    }
}
