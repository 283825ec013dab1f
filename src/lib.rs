//! Oppsum - Podcast Episode Summarizer
//!
//! A CLI tool that turns a Spotify podcast episode into a text summary, an
//! audio narration, and an AI-generated thumbnail.
//!
//! The name "Oppsum" comes from the Norwegian word "oppsummering,"
//! meaning "summary."
//!
//! # Overview
//!
//! One invocation runs one sequential pipeline:
//! fetch the episode description, summarize it with the selected LLM backend
//! (OpenAI, Claude, or Mistral), narrate the summary to an MP3, and generate
//! a square thumbnail image.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings and credential management
//! - `catalog` - Spotify catalog client (token exchange, episode lookup)
//! - `summarizer` - Summarization backends behind one trait
//! - `narrator` - Text-to-speech narration
//! - `illustrator` - Thumbnail generation and download
//! - `pipeline` - Pipeline driver and state machine
//!
//! # Example
//!
//! ```rust,no_run
//! use oppsum::config::{Credentials, Settings};
//! use oppsum::pipeline::Pipeline;
//! use oppsum::summarizer::Backend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env();
//!
//!     let mut pipeline = Pipeline::new(&settings, &credentials, Backend::OpenAi, "US", None)?;
//!     let result = pipeline.run("https://open.spotify.com/episode/abc123").await?;
//!     println!("{}", result.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod illustrator;
pub mod narrator;
pub mod openai;
pub mod pipeline;
pub mod summarizer;

#[cfg(test)]
mod test_support;

pub use error::{OppsumError, Result};
