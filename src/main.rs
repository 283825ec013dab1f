//! Oppsum CLI entry point.

use anyhow::Result;
use clap::Parser;
use oppsum::cli::{commands, Cli, Commands};
use oppsum::config::{Credentials, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Honor a .env file before reading credentials
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("oppsum={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Credentials are read once at startup and stay read-only
    let credentials = Credentials::from_env();

    // Execute command
    match &cli.command {
        Commands::Summarize {
            url,
            backend,
            market,
            run_id,
            unique,
        } => {
            commands::run_summarize(
                url,
                backend,
                market.clone(),
                run_id.clone(),
                *unique,
                settings,
                &credentials,
            )
            .await?;
        }

        Commands::Init => {
            commands::run_init(&settings, &credentials)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &credentials)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
