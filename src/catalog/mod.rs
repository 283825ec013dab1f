//! Media catalog client (Spotify).
//!
//! Exchanges client credentials for a bearer token and fetches a single
//! episode's description. The token lives in an explicit [`CatalogSession`]
//! value threaded through calls, so concurrent runs never share mutable
//! authentication state.

use crate::error::{OppsumError, Result};
use std::time::Duration;
use tracing::{debug, instrument};

/// Timeout for catalog requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extract the episode identifier from a URL or bare id.
///
/// The identifier is the substring after the final `/`; no further URL
/// validation is performed. Returns `None` for empty or whitespace-only
/// input.
pub fn extract_episode_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.rsplit('/').next().map(|s| s.to_string())
}

/// An authenticated catalog session.
///
/// Obtained once per pipeline run and reused for all catalog calls within
/// that run. Not refreshed on expiry; a run is short enough that refresh is
/// handled by starting a new run.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    token: String,
}

impl CatalogSession {
    /// The bearer token for this session.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Client for the media catalog API.
pub struct CatalogClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    api_base_url: String,
}

impl CatalogClient {
    /// Create a catalog client against custom endpoints.
    ///
    /// Endpoints come from [`crate::config::CatalogSettings`]; tests point
    /// them at a local mock server.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        token_url: &str,
        api_base_url: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url: token_url.to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange client credentials for a bearer token.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<CatalogSession> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let body: serde_json::Value = response.json().await?;
        let token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                OppsumError::Auth("token response did not contain an access_token".to_string())
            })?;

        debug!("Obtained catalog access token");

        Ok(CatalogSession {
            token: token.to_string(),
        })
    }

    /// Fetch one episode's description, scoped to a market code.
    ///
    /// Any non-success status fails with an error carrying the status code;
    /// statuses are not classified further.
    #[instrument(skip(self, session), fields(episode_id = %episode_id))]
    pub async fn fetch_description(
        &self,
        session: &CatalogSession,
        episode_id: &str,
        market: &str,
    ) -> Result<String> {
        let url = format!("{}/episodes/{}", self.api_base_url, episode_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .query(&[("market", market)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OppsumError::Fetch(format!(
                "episode lookup returned status {}",
                response.status().as_u16()
            )));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("description")
            .and_then(|d| d.as_str())
            .map(|d| d.to_string())
            .ok_or_else(|| {
                OppsumError::Fetch("episode response did not contain a description".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_mock_server;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn test_extract_episode_id_takes_final_segment() {
        assert_eq!(
            extract_episode_id("https://open.spotify.com/episode/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_episode_id("abc123"), Some("abc123".to_string()));
        assert_eq!(
            extract_episode_id("  https://open.spotify.com/episode/abc123  "),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_episode_id_rejects_blank_input() {
        assert_eq!(extract_episode_id(""), None);
        assert_eq!(extract_episode_id("   "), None);
        assert_eq!(extract_episode_id("\t\n"), None);
    }

    fn client_for(base: &str) -> CatalogClient {
        CatalogClient::new("id", "secret", &format!("{}/api/token", base), base)
    }

    #[tokio::test]
    async fn test_authenticate_returns_session_token() {
        let app = Router::new().route(
            "/api/token",
            post(|| async { Json(json!({"access_token": "test-token", "token_type": "Bearer"})) }),
        );
        let base = spawn_mock_server(app).await;

        let session = client_for(&base).authenticate().await.unwrap();
        assert_eq!(session.token(), "test-token");
    }

    #[tokio::test]
    async fn test_authenticate_fails_without_token_field() {
        let app = Router::new().route(
            "/api/token",
            post(|| async { Json(json!({"error": "invalid_client"})) }),
        );
        let base = spawn_mock_server(app).await;

        let err = client_for(&base).authenticate().await.unwrap_err();
        assert!(matches!(err, OppsumError::Auth(_)));
    }

    #[tokio::test]
    async fn test_fetch_description_returns_description_field() {
        let app = Router::new().route(
            "/episodes/{id}",
            get(|| async { Json(json!({"id": "abc123", "description": "X"})) }),
        );
        let base = spawn_mock_server(app).await;

        let session = CatalogSession {
            token: "t".to_string(),
        };
        let description = client_for(&base)
            .fetch_description(&session, "abc123", "US")
            .await
            .unwrap();
        assert_eq!(description, "X");
    }

    #[tokio::test]
    async fn test_fetch_description_surfaces_status_code() {
        let app = Router::new().route(
            "/episodes/{id}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))) }),
        );
        let base = spawn_mock_server(app).await;

        let session = CatalogSession {
            token: "t".to_string(),
        };
        let err = client_for(&base)
            .fetch_description(&session, "missing", "US")
            .await
            .unwrap_err();
        assert!(matches!(err, OppsumError::Fetch(_)));
        assert!(err.to_string().contains("404"));
    }
}
