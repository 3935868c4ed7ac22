//! Recommendation filter and its mapping onto `/recommendations` query parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::SpotifyError;

/// Spotify accepts at most five seeds per recommendations request.
pub const MAX_SEED_GENRES: usize = 5;

/// Number of tracks requested per call.
pub const RECOMMENDATION_LIMIT: u32 = 20;

/// Genre seeds offered to users.
pub const GENRES: &[&str] = &[
    "pop", "rock", "hip-hop", "electronic", "jazz", "classical",
    "country", "r-n-b", "latin", "indie", "alternative", "blues",
    "folk", "reggae", "punk", "metal", "funk", "soul",
];

/// Musical attribute targets plus genre seeds.
///
/// Numeric fields are forwarded verbatim; ranges are the caller's concern.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    /// Beats per minute.
    pub tempo: f64,
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            energy: 0.5,
            danceability: 0.5,
            valence: 0.5,
            acousticness: 0.5,
            instrumentalness: 0.5,
            genres: Vec::new(),
        }
    }
}

/// Why a request body could not become a [`Filter`].
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("At least one genre must be selected")]
    NoGenres,
    #[error("invalid filter: {0}")]
    Malformed(String),
}

impl Filter {
    /// Decode a request body, whatever content type it was sent with.
    ///
    /// The genre check runs on the raw JSON first, so a body with absent,
    /// null or empty `genres` is rejected as such even if the numeric
    /// targets are missing too.
    pub fn from_json(body: &[u8]) -> Result<Self, FilterError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| FilterError::Malformed(e.to_string()))?;
        if value.is_null() {
            return Err(FilterError::Malformed("body is null".into()));
        }

        let has_genres = match value.get("genres") {
            None | Some(Value::Null) => false,
            Some(Value::Array(genres)) => !genres.is_empty(),
            Some(_) => true,
        };
        if !has_genres {
            return Err(FilterError::NoGenres);
        }

        serde_json::from_value(value).map_err(|e| FilterError::Malformed(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SpotifyError> {
        if self.genres.is_empty() {
            return Err(SpotifyError::Validation(FilterError::NoGenres.to_string()));
        }
        Ok(())
    }

    /// First five genres, comma-joined in the order given.
    pub fn seed_genres(&self) -> String {
        self.genres
            .iter()
            .take(MAX_SEED_GENRES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Outbound parameters, unencoded, in request order.
    ///
    /// Numbers use `f64`'s `Display`, which never switches to exponent
    /// notation: `1e21` is sent as `1000000000000000000000` and `1e-7` as
    /// `0.0000001`. Slider values never reach that range.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("seed_genres", self.seed_genres()),
            ("target_tempo", self.tempo.to_string()),
            ("target_energy", self.energy.to_string()),
            ("target_danceability", self.danceability.to_string()),
            ("target_valence", self.valence.to_string()),
            ("target_acousticness", self.acousticness.to_string()),
            ("target_instrumentalness", self.instrumentalness.to_string()),
            ("limit", RECOMMENDATION_LIMIT.to_string()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
