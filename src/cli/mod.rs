//! CLI module for Oppsum.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Oppsum - Podcast Episode Summarizer
///
/// Turns a Spotify podcast episode into a text summary, an audio narration,
/// and an AI-generated thumbnail. The name "Oppsum" comes from the Norwegian
/// word "oppsummering," meaning "summary."
#[derive(Parser, Debug)]
#[command(name = "oppsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a podcast episode into text, audio, and a thumbnail
    Summarize {
        /// Spotify episode URL (or bare episode id)
        url: String,

        /// Summarizer backend (openai, claude, mistral)
        #[arg(short, long, default_value = "openai")]
        backend: String,

        /// Market code for the episode lookup (overrides config)
        #[arg(short, long)]
        market: Option<String>,

        /// Tag output filenames with this run identifier
        #[arg(long)]
        run_id: Option<String>,

        /// Tag output filenames with a generated run identifier
        #[arg(long)]
        unique: bool,
    },

    /// Create a default configuration file and check credentials
    Init,

    /// Check credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
