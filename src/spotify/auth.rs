//! Client Credentials token exchange.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use super::SpotifyError;
use crate::config::Credentials;

/// Short-lived bearer token. Used for a single request, never stored.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Exchanges client credentials for a fresh token on every call.
#[derive(Clone)]
pub struct TokenProvider {
    client: Client,
    credentials: Credentials,
    token_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl TokenProvider {
    pub fn new(client: Client, credentials: Credentials, token_url: String) -> Self {
        Self {
            client,
            credentials,
            token_url,
        }
    }

    pub async fn fetch_token(&self) -> Result<AccessToken, SpotifyError> {
        if !self.credentials.is_complete() {
            return Err(SpotifyError::Configuration);
        }

        let params = [("grant_type", "client_credentials")];
        let auth = base64::engine::general_purpose::STANDARD.encode(
            format!(
                "{}:{}",
                self.credentials.client_id, self.credentials.client_secret
            )
            .as_bytes(),
        );

        let res = self
            .client
            .post(&self.token_url)
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            tracing::error!(%status, %body, "Spotify token request rejected");
            return Err(SpotifyError::UpstreamAuth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        tracing::debug!("obtained Spotify access token");
        Ok(AccessToken(token.access_token))
    }
}
