//! OAuth2 client-credentials token exchange.

use serde::Deserialize;
use tracing::debug;

use crate::config::HubConfig;
use crate::error::{HubError, Result};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchange the configured client credentials for a bearer token.
///
/// One exchange per client; the token lives for the duration of the run,
/// which comfortably covers the two raster fetches a run performs.
pub(crate) async fn fetch_access_token(
    client: &reqwest::Client,
    config: &HubConfig,
) -> Result<String> {
    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
    ];

    let resp = client
        .post(&config.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| HubError::Auth(format!("token request failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(HubError::Auth(format!(
            "token endpoint returned HTTP {}: {}",
            status,
            body.chars().take(300).collect::<String>()
        )));
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| HubError::Auth(format!("parsing token response: {e}")))?;

    debug!(expires_in = ?token.expires_in, "obtained access token");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses() {
        let json = r#"{"access_token": "abc123", "token_type": "Bearer", "expires_in": 3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.expires_in, Some(3600));
    }

    #[test]
    fn token_response_without_expiry_parses() {
        let json = r#"{"access_token": "abc123"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert!(token.expires_in.is_none());
    }
}
