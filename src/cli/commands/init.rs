//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use console::style;

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings, credentials: &Credentials) -> anyhow::Result<()> {
    Output::header("Oppsum Setup");
    println!();

    // Step 1: write the default config file if there isn't one yet
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!(
            "Config file already exists at {}",
            config_path.display()
        ));
    } else {
        settings.save()?;
        Output::success(&format!(
            "Created default config at {}",
            config_path.display()
        ));
    }

    // Step 2: report credential status
    println!();
    println!("{}", style("Credential status").bold());

    let keys = [
        ("SPOTIFY_CLIENT_ID", credentials.spotify_client_id.is_some()),
        ("SPOTIFY_CLIENT_SECRET", credentials.spotify_client_secret.is_some()),
        ("OPENAI_API_KEY", credentials.openai_api_key.is_some()),
        ("ANTHROPIC_API_KEY", credentials.anthropic_api_key.is_some()),
        ("MISTRAL_API_KEY", credentials.mistral_api_key.is_some()),
        ("OPENAI_IMAGE_API_KEY", credentials.openai_image_api_key.is_some()),
    ];

    let mut missing = Vec::new();
    for (name, present) in keys {
        if present {
            println!("  {} {}", style("✓").green(), name);
        } else {
            println!("  {} {}", style("✗").red(), name);
            missing.push(name);
        }
    }

    println!();
    if missing.is_empty() {
        Output::success("All credentials are set. Try: oppsum summarize <episode-url>");
    } else {
        Output::warning("Some credentials are missing. Set them in your shell or a .env file:");
        for name in missing {
            println!("  {}", style(format!("export {}='...'", name)).green());
        }
    }

    Ok(())
}
