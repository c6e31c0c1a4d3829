#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Canned responses for the three backend endpoints
#[derive(Clone)]
pub struct StubBackend {
    pub health_status: StatusCode,
    pub health_body: String,
    pub movies_status: StatusCode,
    pub movies_body: String,
    pub recommend_status: StatusCode,
    pub recommend_body: String,
    pub recommend_delay: Option<Duration>,
}

/// A request seen by the recommend endpoint
#[derive(Debug, Clone)]
pub struct RecordedSubmit {
    pub body: Value,
    pub request_id: Option<String>,
}

#[derive(Clone)]
pub struct StubState {
    config: Arc<StubBackend>,
    pub health_hits: Arc<AtomicUsize>,
    pub catalog_hits: Arc<AtomicUsize>,
    pub submits: Arc<Mutex<Vec<RecordedSubmit>>>,
}

impl StubState {
    pub fn health_hits(&self) -> usize {
        self.health_hits.load(Ordering::SeqCst)
    }

    pub fn catalog_hits(&self) -> usize {
        self.catalog_hits.load(Ordering::SeqCst)
    }

    pub fn submits(&self) -> Vec<RecordedSubmit> {
        self.submits.lock().unwrap().clone()
    }
}

impl StubBackend {
    /// Healthy backend with catalog `{1,"A"},{2,"B"},{3,"C"}` and one recommendation
    pub fn healthy() -> Self {
        Self {
            health_status: StatusCode::OK,
            health_body: json!({
                "status": "ok",
                "movies_loaded": true,
                "ratings_loaded": true,
                "movies_count": 3,
                "ratings_count": 12
            })
            .to_string(),
            movies_status: StatusCode::OK,
            movies_body: json!([
                { "id": 1, "title": "A", "genres": "Action" },
                { "id": 2, "title": "B", "genres": "Comedy" },
                { "id": 3, "title": "C" }
            ])
            .to_string(),
            recommend_status: StatusCode::OK,
            recommend_body: json!([
                { "id": 50, "title": "Star Wars (1977)", "genres": "Action|Sci-Fi", "avgRating": 4.36 },
                { "id": 100, "title": "Fargo (1996)", "genres": "Crime|Drama", "avgRating": null }
            ])
            .to_string(),
            recommend_delay: None,
        }
    }

    pub fn with_health(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.health_status = status;
        self.health_body = body.into();
        self
    }

    pub fn with_movies(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.movies_status = status;
        self.movies_body = body.into();
        self
    }

    pub fn with_recommend(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.recommend_status = status;
        self.recommend_body = body.into();
        self
    }

    pub fn with_recommend_delay(mut self, delay: Duration) -> Self {
        self.recommend_delay = Some(delay);
        self
    }

    /// Serves the stub on an ephemeral localhost port and returns its base URL
    pub async fn spawn(self) -> (String, StubState) {
        let state = StubState {
            config: Arc::new(self),
            health_hits: Arc::new(AtomicUsize::new(0)),
            catalog_hits: Arc::new(AtomicUsize::new(0)),
            submits: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/health", get(health))
            .route("/api/movies", get(movies))
            .route("/api/recommend", post(recommend))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), state)
    }
}

async fn health(State(state): State<StubState>) -> (StatusCode, String) {
    state.health_hits.fetch_add(1, Ordering::SeqCst);
    (state.config.health_status, state.config.health_body.clone())
}

async fn movies(State(state): State<StubState>) -> (StatusCode, String) {
    state.catalog_hits.fetch_add(1, Ordering::SeqCst);
    (state.config.movies_status, state.config.movies_body.clone())
}

async fn recommend(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let recorded = RecordedSubmit {
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
        request_id: headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };
    state.submits.lock().unwrap().push(recorded);

    if let Some(delay) = state.config.recommend_delay {
        tokio::time::sleep(delay).await;
    }

    (state.config.recommend_status, state.config.recommend_body.clone())
}

/// A base URL nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A base URL whose every response is a 500 with a body cut short
pub async fn truncated_error_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\nconnection: close\r\n\r\npartial",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}
