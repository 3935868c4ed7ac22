//! In-process stand-in for the Spotify accounts and Web API endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::task::JoinHandle;

use crate::config::{Config, Credentials};

pub const MOCK_TOKEN: &str = "abc123";

pub const RECOMMENDATIONS_BODY: &str = r#"{"tracks":[{"id":"4uLU6hMCjMI75M1A2tKUQC","name":"Never Gonna Give You Up","artists":[{"id":"0gxyHStUsqpMadRV0Di1Qt","name":"Rick Astley"}],"album":{"id":"6XhjNHCyCDyyGJRM5mg40G","name":"Whenever You Need Somebody","images":[{"url":"https://i.scdn.co/image/640","width":640,"height":640}]},"duration_ms":213573,"external_urls":{"spotify":"https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"},"preview_url":null}],"seeds":[]}"#;

pub struct MockBehavior {
    pub token_status: StatusCode,
    pub recommendations_status: StatusCode,
    pub recommendations_body: String,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            recommendations_status: StatusCode::OK,
            recommendations_body: RECOMMENDATIONS_BODY.to_string(),
        }
    }
}

#[derive(Default)]
pub struct Recorded {
    pub token_calls: AtomicUsize,
    pub recommendation_calls: AtomicUsize,
    pub last_token_auth: Mutex<Option<String>>,
    pub last_token_form: Mutex<Option<String>>,
    pub last_bearer: Mutex<Option<String>>,
    pub last_raw_query: Mutex<Option<String>>,
    pub last_query: Mutex<Option<HashMap<String, String>>>,
}

struct Shared {
    behavior: MockBehavior,
    recorded: Arc<Recorded>,
}

/// Running mock server; aborted on drop.
pub struct MockSpotify {
    pub addr: SocketAddr,
    pub state: Arc<Recorded>,
    handle: JoinHandle<()>,
}

impl MockSpotify {
    pub async fn start(behavior: MockBehavior) -> Self {
        let recorded = Arc::new(Recorded::default());
        let shared = Arc::new(Shared {
            behavior,
            recorded: recorded.clone(),
        });

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/recommendations", get(recommendations))
            .with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock spotify");
        let addr = listener.local_addr().expect("mock addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock spotify server");
        });

        Self {
            addr,
            state: recorded,
            handle,
        }
    }

    pub fn config(&self, credentials: Credentials) -> Config {
        Config::with_endpoints(
            credentials,
            format!("http://{}/api/token", self.addr),
            format!("http://{}/v1", self.addr),
        )
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn recommendation_calls(&self) -> usize {
        self.state.recommendation_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.state
            .last_query
            .lock()
            .unwrap()
            .clone()
            .expect("recommendations endpoint was not called")
    }
}

impl Drop for MockSpotify {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn token(State(shared): State<Arc<Shared>>, headers: HeaderMap, body: String) -> Response {
    let recorded = &shared.recorded;
    recorded.token_calls.fetch_add(1, Ordering::SeqCst);
    *recorded.last_token_auth.lock().unwrap() = header_value(&headers, header::AUTHORIZATION);
    *recorded.last_token_form.lock().unwrap() = Some(body);

    let status = shared.behavior.token_status;
    if !status.is_success() {
        return (status, Json(json!({ "error": "invalid_client" }))).into_response();
    }
    Json(json!({
        "access_token": MOCK_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
    }))
    .into_response()
}

async fn recommendations(
    State(shared): State<Arc<Shared>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let recorded = &shared.recorded;
    recorded.recommendation_calls.fetch_add(1, Ordering::SeqCst);
    *recorded.last_bearer.lock().unwrap() = header_value(&headers, header::AUTHORIZATION);
    *recorded.last_raw_query.lock().unwrap() = raw;
    *recorded.last_query.lock().unwrap() = Some(params);

    (
        shared.behavior.recommendations_status,
        [(header::CONTENT_TYPE, "application/json")],
        shared.behavior.recommendations_body.clone(),
    )
        .into_response()
}
