//! Spotify catalog types as returned by `/recommendations`.

use serde::{Deserialize, Deserializer, Serialize};

const EMBED_BASE: &str = "https://open.spotify.com/embed/track";

/// Body of a successful recommendations call.
///
/// Every field tolerates absence and `null`; this view is only used to
/// summarize what is relayed.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecommendationsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: Vec<Track>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seeds: Vec<Seed>,
}

/// A Spotify track (simplified).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<Artist>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: Album,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct Album {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// How a seed contributed to the recommendation pool.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub initial_pool_size: Option<u64>,
    #[serde(default)]
    pub after_filtering_size: Option<u64>,
    #[serde(default)]
    pub after_relinking_size: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Largest album image, which Spotify lists first.
    pub fn album_image_url(&self) -> Option<&str> {
        self.album.images.first().and_then(|i| i.url.as_deref())
    }

    /// Duration as `m:ss`.
    pub fn formatted_duration(&self) -> String {
        let minutes = self.duration_ms / 60_000;
        let seconds = (self.duration_ms % 60_000) / 1000;
        format!("{}:{:02}", minutes, seconds)
    }

    /// URL of the embeddable player for this track.
    pub fn embed_url(&self) -> String {
        format!("{}/{}", EMBED_BASE, self.id)
    }
}
