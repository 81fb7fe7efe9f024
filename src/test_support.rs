//! In-process stand-in for the remote contents API, for tests.
//!
//! Serves `/repos/{owner}/{repo}/contents[/{path}]` from registered
//! directories and files and `/raw/{path}` for downloads, counting hits and
//! remembering the request headers it saw.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::github::client::{join_path, ClientConfig};
use crate::models::EntryKind;

#[derive(Default)]
pub struct MockState {
    base: String,
    dirs: Mutex<HashMap<String, Vec<(String, EntryKind)>>>,
    files: Mutex<HashMap<String, String>>,
    submodules: Mutex<HashSet<String>>,
    delay: Mutex<Option<Duration>>,
    html_body: AtomicBool,
    failure: Mutex<Option<(u16, Option<&'static str>)>>,
    download_failure: Mutex<Option<u16>>,
    pub contents_hits: AtomicUsize,
    pub download_hits: AtomicUsize,
    pub last_auth: Mutex<Option<String>>,
    pub last_download_auth: Mutex<Option<String>>,
    pub last_user_agent: Mutex<Option<String>>,
    pub last_contents_uri: Mutex<Option<String>>,
}

pub struct MockUpstream {
    pub base: String,
    pub state: Arc<MockState>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(MockState {
            base: base.clone(),
            ..Default::default()
        });

        let app = Router::new()
            .route("/repos/{owner}/{repo}/contents", get(contents_root))
            .route("/repos/{owner}/{repo}/contents/{*path}", get(contents))
            .route("/raw/{*path}", get(raw))
            .with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base, state }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base).unwrap()
    }

    pub fn with_dir(&self, path: &str, entries: &[(&str, EntryKind)]) {
        let entries = entries.iter().map(|(n, k)| (n.to_string(), *k)).collect();
        self.state.dirs.lock().unwrap().insert(path.to_string(), entries);
    }

    pub fn with_file(&self, path: &str, body: &str) {
        self.state.files.lock().unwrap().insert(path.to_string(), body.to_string());
    }

    /// Answer every contents call with `status`, optionally with an
    /// `x-ratelimit-remaining` header.
    pub fn fail_with(&self, status: u16, remaining: Option<&'static str>) {
        *self.state.failure.lock().unwrap() = Some((status, remaining));
    }

    pub fn clear_failure(&self) {
        *self.state.failure.lock().unwrap() = None;
    }

    /// A file entry whose `download_url` is null, as the API reports submodules.
    pub fn with_submodule(&self, path: &str) {
        self.state.submodules.lock().unwrap().insert(path.to_string());
    }

    /// Hold every contents call for `delay` before answering.
    pub fn delay_contents(&self, delay: Duration) {
        *self.state.delay.lock().unwrap() = Some(delay);
    }

    /// Answer contents calls with a 200 HTML page instead of JSON.
    pub fn answer_with_html(&self) {
        self.state.html_body.store(true, Ordering::SeqCst);
    }

    pub fn fail_downloads_with(&self, status: u16) {
        *self.state.download_failure.lock().unwrap() = Some(status);
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

async fn contents_root(
    State(state): State<Arc<MockState>>,
    Path((_owner, _repo)): Path<(String, String)>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    respond_contents(&state, "", &headers, &uri)
}

async fn contents(
    State(state): State<Arc<MockState>>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    respond_contents(&state, &path, &headers, &uri)
}

fn respond_contents(state: &MockState, path: &str, headers: &HeaderMap, uri: &Uri) -> Response {
    state.contents_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_auth.lock().unwrap() = header_value(headers, header::AUTHORIZATION);
    *state.last_user_agent.lock().unwrap() = header_value(headers, header::USER_AGENT);
    *state.last_contents_uri.lock().unwrap() = Some(uri.path().to_string());

    if let Some((status, remaining)) = *state.failure.lock().unwrap() {
        let status = StatusCode::from_u16(status).unwrap();
        let body = Json(json!({ "message": "failure" }));
        return match remaining {
            Some(remaining) => {
                (status, [("x-ratelimit-remaining", remaining)], body).into_response()
            }
            None => (status, body).into_response(),
        };
    }

    if state.html_body.load(Ordering::SeqCst) {
        return (
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>Sign in</body></html>",
        )
            .into_response();
    }

    if let Some(entries) = state.dirs.lock().unwrap().get(path) {
        let items: Vec<Value> = entries
            .iter()
            .map(|(name, kind)| entry_json(state, &join_path(path, name), name, *kind))
            .collect();
        return Json(Value::Array(items)).into_response();
    }

    if state.files.lock().unwrap().contains_key(path) {
        let name = path.rsplit('/').next().unwrap_or(path);
        return Json(entry_json(state, path, name, EntryKind::File)).into_response();
    }

    if state.submodules.lock().unwrap().contains(path) {
        let name = path.rsplit('/').next().unwrap_or(path);
        let entry = json!({
            "name": name,
            "path": path,
            "type": "submodule",
            "download_url": null,
        });
        return Json(entry).into_response();
    }

    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response()
}

fn entry_json(state: &MockState, path: &str, name: &str, kind: EntryKind) -> Value {
    match kind {
        EntryKind::Dir => {
            json!({ "name": name, "path": path, "type": "dir", "download_url": null })
        }
        EntryKind::File => json!({
            "name": name,
            "path": path,
            "type": "file",
            "size": 0,
            "download_url": format!("{}/raw/{}", state.base, path),
        }),
    }
}

async fn raw(
    State(state): State<Arc<MockState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.download_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_download_auth.lock().unwrap() = header_value(&headers, header::AUTHORIZATION);

    if let Some(status) = *state.download_failure.lock().unwrap() {
        return StatusCode::from_u16(status).unwrap().into_response();
    }

    match state.files.lock().unwrap().get(&path) {
        Some(body) => body.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
