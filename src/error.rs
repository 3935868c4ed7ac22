use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::spotify::{FilterError, SpotifyError};

/// Message returned for every failure that is not the caller's fault.
/// Upstream detail stays in the server log.
const GENERIC_FAILURE: &str = "Failed to fetch recommendations";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// Request body was not a valid filter.
    MalformedBody(String),
    Spotify(SpotifyError),
}

impl From<SpotifyError> for AppError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Validation(msg) => AppError::BadRequest(msg),
            other => AppError::Spotify(other),
        }
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        match err {
            err @ FilterError::NoGenres => AppError::BadRequest(err.to_string()),
            FilterError::Malformed(reason) => AppError::MalformedBody(reason),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MalformedBody(reason) => {
                tracing::error!(%reason, "rejected recommendations request body");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            AppError::Spotify(err) => {
                tracing::error!(error = %err, "error fetching recommendations");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };
        (
            status,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}
