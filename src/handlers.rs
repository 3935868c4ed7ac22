//! HTTP handlers for the recommendations API.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::spotify::{Filter, SpotifyClient, GENRES};

/// Form options for a client building a filter.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub genres: &'static [&'static str],
    pub defaults: Filter,
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/genres - Selectable genres and initial filter values.
pub async fn genres() -> impl IntoResponse {
    Json(FilterOptions {
        genres: GENRES,
        defaults: Filter::default(),
    })
}

/// POST /api/recommendations - Relay Spotify recommendations for a filter.
///
/// The body is read as JSON regardless of `Content-Type`. The upstream JSON
/// body is returned unchanged.
pub async fn recommendations(
    State(spotify): State<SpotifyClient>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let filter = Filter::from_json(&body)?;

    let result = spotify.get_recommendations(&filter).await?;
    tracing::debug!(
        tracks = result.tracks.len(),
        seeds = result.seeds.len(),
        "relaying recommendations"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        result.body,
    ))
}

/// Build the API router.
pub fn router() -> Router<SpotifyClient> {
    Router::new()
        .route("/health", get(health))
        .route("/api/genres", get(genres))
        .route("/api/recommendations", post(recommendations))
}
