//! In-process mock middleware for integration tests.
//!
//! Records every request it receives and answers with a canned status and
//! body per path (default `200 OK` with an empty body).

#![allow(dead_code, clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use tokio::task::JoinHandle;

use localcloud_client::{ClientConfig, MediationClient};

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// `Content-Length` header, if any.
    pub content_length: Option<usize>,
    /// Raw body.
    pub body: Bytes,
}

impl Recorded {
    /// Decodes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("request body is not the expected JSON: {e}"))
    }
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
struct MockState {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<HashMap<String, Canned>>,
}

/// A running mock middleware bound to an ephemeral localhost port.
#[derive(Debug)]
pub struct MockMiddleware {
    /// Address the mock listens on.
    pub addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockMiddleware {
    /// Starts the mock server.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("failed to bind mock middleware");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("mock middleware has no local address");
        };
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, task }
    }

    /// Answers requests to `path` with `status` and `body`.
    pub fn respond(&self, path: &str, status: StatusCode, body: &str) {
        self.respond_after(path, status, body, Duration::ZERO);
    }

    /// Like [`MockMiddleware::respond`], but waits `delay` before answering.
    pub fn respond_after(&self, path: &str, status: StatusCode, body: &str, delay: Duration) {
        self.state
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_string(),
                Canned {
                    status,
                    body: body.to_string(),
                    delay,
                },
            );
    }

    /// Everything received so far, in arrival order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The single request received so far.
    pub fn only_request(&self) -> Recorded {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        let Some(request) = requests.pop() else {
            panic!("no request recorded");
        };
        request
    }

    /// Client configuration targeting this mock.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.addr.ip().to_string(), self.addr.port())
    }

    /// Client targeting this mock.
    pub fn client(&self) -> MediationClient {
        client_for(self.config())
    }
}

impl Drop for MockMiddleware {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Builds a client, failing the test on configuration errors.
pub fn client_for(config: ClientConfig) -> MediationClient {
    MediationClient::new(config).unwrap_or_else(|e| panic!("client construction failed: {e}"))
}

/// A localhost port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind probe listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("probe listener has no local address");
    };
    drop(listener);
    addr.port()
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let header = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        content_type: header(CONTENT_TYPE),
        content_length: header(CONTENT_LENGTH).and_then(|v| v.parse().ok()),
        body,
    };
    let canned = state
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&recorded.path)
        .cloned();
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded);

    match canned {
        Some(canned) => {
            if !canned.delay.is_zero() {
                tokio::time::sleep(canned.delay).await;
            }
            (canned.status, canned.body)
        }
        None => (StatusCode::OK, String::new()),
    }
}
