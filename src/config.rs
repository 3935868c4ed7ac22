use std::env;

const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub credentials: Credentials,
    pub token_url: String,
    pub api_base: String,
}

/// Spotify client-credentials pair.
///
/// Either half may be empty; the token provider rejects that per request
/// rather than at boot.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let credentials = Credentials::new(
            env::var("SPOTIFY_CLIENT_ID").unwrap_or_default(),
            env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default(),
        );
        if !credentials.is_complete() {
            tracing::warn!(
                "SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set; recommendation requests will fail"
            );
        }

        let token_url = env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.into());
        let api_base = env::var("SPOTIFY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        if url_has_no_scheme(&token_url) || url_has_no_scheme(&api_base) {
            anyhow::bail!("SPOTIFY_TOKEN_URL and SPOTIFY_API_BASE must be absolute http(s) URLs");
        }

        Ok(Self {
            port,
            ..Self::with_endpoints(credentials, token_url, api_base)
        })
    }

    /// Config pointing at the given endpoints; used when the upstream is not Spotify itself.
    pub fn with_endpoints(
        credentials: Credentials,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base: String = api_base.into();
        Self {
            port: 0,
            credentials,
            token_url: token_url.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

fn url_has_no_scheme(url: &str) -> bool {
    !(url.starts_with("http://") || url.starts_with("https://"))
}
