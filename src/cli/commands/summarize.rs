//! Summarize command implementation.

use crate::cli::{preflight, Output};
use crate::config::{Credentials, Settings};
use crate::pipeline::Pipeline;
use crate::summarizer::Backend;
use anyhow::Result;
use uuid::Uuid;

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    backend: &str,
    market: Option<String>,
    run_id: Option<String>,
    unique: bool,
    settings: Settings,
    credentials: &Credentials,
) -> Result<()> {
    let backend: Backend = backend.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // Pre-flight checks before any network call
    if let Err(e) = preflight::check(backend, credentials) {
        Output::error(&format!("{}", e));
        Output::info("Run 'oppsum doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    // An explicit run id wins over --unique
    let run_id = run_id.or_else(|| unique.then(|| Uuid::new_v4().simple().to_string()));
    let market = market.unwrap_or_else(|| settings.catalog.market.clone());

    let mut pipeline = Pipeline::new(&settings, credentials, backend, &market, run_id.as_deref())?;

    let spinner = Output::spinner(&format!(
        "Summarizing episode with the {} backend...",
        backend
    ));

    match pipeline.run(url).await {
        Ok(result) => {
            spinner.finish_and_clear();

            Output::header("Summary");
            println!("\n{}\n", result.summary);

            Output::header("Artifacts");
            Output::kv("Episode", &result.episode_id);
            Output::kv("Audio", &result.audio_path.display().to_string());
            Output::kv("Thumbnail", &result.thumbnail_path.display().to_string());

            Output::success("Pipeline complete.");
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
