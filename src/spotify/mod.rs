//! Spotify Web API client.
//!
//! Uses Client Credentials flow for server-to-server authentication. A new
//! token is exchanged for every recommendations request; nothing is cached.

mod auth;
mod filter;
mod model;

#[cfg(test)]
pub(crate) mod mock;

use reqwest::Client;
use thiserror::Error;

use crate::config::Config;

use auth::TokenProvider;
use model::RecommendationsResponse;

pub use filter::{Filter, FilterError, GENRES};
pub use model::{Seed, Track};

/// Failures talking to Spotify, or preconditions checked before doing so.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify credentials not configured")]
    Configuration,

    #[error("{0}")]
    Validation(String),

    #[error("token request failed: {status} - {body}")]
    UpstreamAuth { status: u16, body: String },

    #[error("Spotify API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response parse failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Recommendations as returned by Spotify.
///
/// `body` is the upstream JSON text, untouched, so it can be relayed as-is.
/// `tracks` and `seeds` are a best-effort reading of it and are empty when
/// the body has an unexpected shape.
#[derive(Debug)]
pub struct Recommendations {
    pub body: String,
    pub tracks: Vec<Track>,
    pub seeds: Vec<Seed>,
}

/// Spotify API client.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    tokens: TokenProvider,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::new();
        Self {
            tokens: TokenProvider::new(
                client.clone(),
                config.credentials.clone(),
                config.token_url.clone(),
            ),
            client,
            api_base: config.api_base.clone(),
        }
    }

    /// Fetch up to 20 recommendations seeded by the filter's genres.
    pub async fn get_recommendations(&self, filter: &Filter) -> Result<Recommendations, SpotifyError> {
        filter.validate()?;

        let token = self.tokens.fetch_token().await?;
        let url = format!("{}/recommendations?{}", self.api_base, filter.to_query_string());

        let res = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token.as_str()))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            tracing::error!(%status, %body, "Spotify recommendations request failed");
            return Err(SpotifyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        let parsed = serde_json::from_value::<RecommendationsResponse>(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unexpected recommendations shape; relaying as-is");
            RecommendationsResponse::default()
        });
        tracing::info!(
            seeds = %filter.seed_genres(),
            tracks = parsed.tracks.len(),
            "fetched recommendations"
        );
        for track in &parsed.tracks {
            tracing::debug!(
                id = %track.id,
                name = %track.name,
                artists = %track.artist_names(),
                duration = %track.formatted_duration(),
                image = ?track.album_image_url(),
                player = %track.embed_url(),
                "recommended track"
            );
        }

        Ok(Recommendations {
            body,
            tracks: parsed.tracks,
            seeds: parsed.seeds,
        })
    }
}
