use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// What the fake backend answers with
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// 200 with audio derived from the request text
    Audio,
    Status(u16, String),
}

/// One request as the fake backend saw it
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub voice_id: String,
    pub api_key: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct FakeTtsState {
    calls: AtomicUsize,
    requests: Mutex<Vec<CapturedRequest>>,
    response: Mutex<FakeResponse>,
    latency: Mutex<Duration>,
}

/// Stand-in for the remote TTS API on an ephemeral local port
pub struct FakeTtsServer {
    pub base_url: String,
    state: Arc<FakeTtsState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl FakeTtsServer {
    pub async fn start() -> Self {
        let state = Arc::new(FakeTtsState {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            response: Mutex::new(FakeResponse::Audio),
            latency: Mutex::new(Duration::ZERO),
        });

        let app = Router::new()
            .route("/v1/text-to-speech/:voice_id", post(synthesize))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            state,
            _handle: handle,
        }
    }

    pub fn respond_with(&self, response: FakeResponse) {
        *self.state.response.lock() = response;
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.state.latency.lock() = latency;
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CapturedRequest> {
        self.state.requests.lock().last().cloned()
    }
}

/// Audio the fake returns for `text`
pub fn fake_audio(text: &str) -> Vec<u8> {
    let mut audio = vec![0xFF, 0xFB, 0x90, 0x00];
    audio.extend_from_slice(text.as_bytes());
    audio
}

async fn synthesize(
    State(state): State<Arc<FakeTtsState>>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
    let text = body
        .get("text")
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string();

    state.requests.lock().push(CapturedRequest {
        voice_id,
        api_key: header("xi-api-key"),
        accept: header("accept"),
        content_type: header("content-type"),
        body,
    });

    let latency = *state.latency.lock();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let response = state.response.lock().clone();
    match response {
        FakeResponse::Audio => (StatusCode::OK, fake_audio(&text)).into_response(),
        FakeResponse::Status(status, body) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
    }
}
