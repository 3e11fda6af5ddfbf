//! Scripted stand-in for the back-office API.
//!
//! Every request is recorded; responses come from a table keyed by method
//! and path, defaulting to `200 {}`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use galleria_client::HttpBackoffice;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Default)]
struct Script {
    requests: Vec<Recorded>,
    responses: HashMap<(String, String), (u16, String)>,
}

type Shared = Arc<Mutex<Script>>;

pub struct StubBackend {
    pub base_url: String,
    script: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    pub async fn spawn() -> Self {
        let script: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(script.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            script,
            handle,
        }
    }

    pub fn client(&self) -> HttpBackoffice {
        HttpBackoffice::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    /// Answer `method path` with `status` and `body`.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .responses
            .insert((method.to_string(), path.to_string()), (status, body.into()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().requests.clone()
    }

    /// `"METHOD /path"` for every request, in arrival order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(script): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut script = script.lock().unwrap();
    let key = (method.to_string(), uri.path().to_string());
    script.requests.push(Recorded {
        method: key.0.clone(),
        path: key.1.clone(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, body) = script
        .responses
        .get(&key)
        .cloned()
        .unwrap_or((200, "{}".to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
