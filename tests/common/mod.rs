#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use campaign_manager::auth::TokenHolder;
use campaign_manager::ApiClient;

/// One request as the stub backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

type Routes = HashMap<(Method, String), (StatusCode, Value)>;

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<Routes>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// In-process backend answering canned JSON per method and path
pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn start(routes: Vec<(Method, &str, StatusCode, Value)>) -> Result<Self> {
        let routes: Routes = routes
            .into_iter()
            .map(|(method, path, status, body)| ((method, path.to_string()), (status, body)))
            .collect();
        let state = StubState {
            routes: Arc::new(routes),
            requests: Arc::default(),
        };

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind stub backend")?;

        let app = Router::new().fallback(answer).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        })
    }

    pub fn client(&self, token: Option<&str>) -> ApiClient {
        let tokens = match token {
            Some(token) => TokenHolder::with_token(token),
            None => TokenHolder::new(),
        };
        ApiClient::new(Url::parse(&self.base_url).expect("stub url"), tokens)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn answer(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.requests.lock().expect("requests lock").push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body,
    });

    match state.routes.get(&(method, path)) {
        Some((status, body)) => (*status, Json(body.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))),
    }
}
