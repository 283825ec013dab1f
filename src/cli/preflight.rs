//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are present before the pipeline makes
//! any network call, so a missing key fails immediately instead of midway.

use crate::config::Credentials;
use crate::error::Result;
use crate::summarizer::Backend;

/// Check that the selected backend and all pipeline stages have credentials.
pub fn check(backend: Backend, credentials: &Credentials) -> Result<()> {
    credentials.spotify()?;

    match backend {
        Backend::OpenAi => {
            credentials.openai()?;
        }
        Backend::Claude => {
            credentials.anthropic()?;
        }
        Backend::Mistral => {
            credentials.mistral()?;
        }
    }

    // Narration always uses the OpenAI key, illustration the image key.
    credentials.openai()?;
    credentials.image()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_credentials() -> Credentials {
        Credentials {
            spotify_client_id: Some("id".to_string()),
            spotify_client_secret: Some("secret".to_string()),
            openai_api_key: Some("openai".to_string()),
            anthropic_api_key: Some("anthropic".to_string()),
            mistral_api_key: Some("mistral".to_string()),
            openai_image_api_key: Some("image".to_string()),
        }
    }

    #[test]
    fn test_check_passes_with_full_credentials() {
        for backend in [Backend::OpenAi, Backend::Claude, Backend::Mistral] {
            assert!(check(backend, &full_credentials()).is_ok());
        }
    }

    #[test]
    fn test_check_reports_missing_backend_key() {
        let mut credentials = full_credentials();
        credentials.mistral_api_key = None;

        assert!(check(Backend::OpenAi, &credentials).is_ok());
        let err = check(Backend::Mistral, &credentials).unwrap_err();
        assert!(err.to_string().contains("MISTRAL_API_KEY"));
    }

    #[test]
    fn test_check_requires_image_key_for_every_backend() {
        let mut credentials = full_credentials();
        credentials.openai_image_api_key = None;

        let err = check(Backend::Claude, &credentials).unwrap_err();
        assert!(err.to_string().contains("OPENAI_IMAGE_API_KEY"));
    }
}
