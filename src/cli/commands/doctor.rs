//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use console::style;

/// Check result for a single item.
struct CheckResult {
    name: String,
    ok: bool,
    message: String,
    hint: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            ok: true,
            message: message.to_string(),
            hint: None,
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            ok: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = if self.ok {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);
        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, credentials: &Credentials) -> anyhow::Result<()> {
    Output::header("Oppsum Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    println!("{}", style("Credentials").bold());
    let checks = [
        check_key("SPOTIFY_CLIENT_ID", &credentials.spotify_client_id, "catalog access"),
        check_key(
            "SPOTIFY_CLIENT_SECRET",
            &credentials.spotify_client_secret,
            "catalog access",
        ),
        check_key(
            "OPENAI_API_KEY",
            &credentials.openai_api_key,
            "openai backend and narration",
        ),
        check_key("ANTHROPIC_API_KEY", &credentials.anthropic_api_key, "claude backend"),
        check_key("MISTRAL_API_KEY", &credentials.mistral_api_key, "mistral backend"),
        check_key(
            "OPENAI_IMAGE_API_KEY",
            &credentials.openai_image_api_key,
            "thumbnail generation",
        ),
    ];
    for check in &checks {
        check.print();
    }

    println!();
    println!("{}", style("Configuration").bold());
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("config file", &config_path.display().to_string()).print();
    } else {
        CheckResult::error(
            "config file",
            "not found (defaults in use)",
            "Run 'oppsum init' to create one.",
        )
        .print();
    }
    CheckResult::ok("output directory", &settings.output_dir().display().to_string()).print();

    println!();
    let missing = checks.iter().filter(|c| !c.ok).count();
    if missing == 0 {
        Output::success("All credentials are configured.");
    } else {
        Output::warning(&format!(
            "{} credential(s) missing. Backends using them will fail preflight.",
            missing
        ));
    }

    Ok(())
}

fn check_key(name: &str, value: &Option<String>, used_for: &str) -> CheckResult {
    match value {
        Some(_) => CheckResult::ok(name, &format!("set ({})", used_for)),
        None => CheckResult::error(
            name,
            &format!("not set ({})", used_for),
            &format!("export {}='...' or add it to a .env file", name),
        ),
    }
}
