use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A stand-in for the storefront backend's status endpoint.
///
/// Replies are served in order; the last one repeats once the queue runs dry.
#[derive(Clone, Default)]
pub struct StatusStub {
    replies: Arc<Mutex<VecDeque<(u16, String)>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl StatusStub {
    pub async fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().await.clone()
    }

    pub async fn hits(&self) -> usize {
        self.queries.lock().await.len()
    }
}

async fn status_handler(
    State(stub): State<StatusStub>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.queries.lock().await.push(params);

    let (code, body) = {
        let mut replies = stub.replies.lock().await;
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap()
        }
    };

    (
        StatusCode::from_u16(code).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Starts the stub on an ephemeral port and returns its API base URL.
pub async fn spawn_status_stub(replies: &[(u16, &str)]) -> (String, StatusStub) {
    let stub = StatusStub {
        replies: Arc::new(Mutex::new(
            replies
                .iter()
                .map(|(code, body)| (*code, body.to_string()))
                .collect(),
        )),
        ..StatusStub::default()
    };

    let app = Router::new()
        .route("/api/v1/sypago/debit/transaction/status", get(status_handler))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), stub)
}

/// Writes a config file with short timings so end-to-end runs finish quickly.
pub fn write_fast_config(path: &Path, deadline_ms: u64) {
    let config = serde_json::json!({
        "initial_delay_ms": 10,
        "delay_increment_ms": 5,
        "deadline_ms": deadline_ms,
        "request_timeout_ms": 1000,
    });
    std::fs::write(path, config.to_string()).unwrap();
}
