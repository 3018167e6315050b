//! Shared test helpers for integration tests: a fake DAV server on an
//! ephemeral port that replays scripted replies and records every request.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use fileman_client::DavHttpClient;
use fileman_core::config::AppConfig;
use fileman_core::traits::{BrowserView, Notice};
use fileman_core::types::{FileEntry, NodeId, ResourcePath, TreeNode, UploadProgress};
use fileman_service::BrowserContext;

/// Account root used by every test.
pub const ROOT: &str = "/files";

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// A canned reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Reply {
    /// 200 with a JSON body.
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
            headers: Vec::new(),
        }
    }

    /// Empty reply with `status`.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Add a response header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
struct Rule {
    method: Method,
    path: String,
    body_contains: Option<String>,
    reply: Reply,
}

#[derive(Debug, Default)]
struct FakeState {
    rules: Mutex<Vec<Rule>>,
    requests: Mutex<Vec<Recorded>>,
}

/// Fake DAV server handle.
pub struct TestServer {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl TestServer {
    /// Bind to `127.0.0.1:0` and start serving.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Reply to `method path` with `reply`. Earlier rules win.
    pub fn on(&self, method: Method, path: &str, reply: Reply) {
        self.push(method, path, None, reply);
    }

    /// Like [`TestServer::on`], only for bodies containing `needle`.
    pub fn on_body(&self, method: Method, path: &str, needle: &str, reply: Reply) {
        self.push(method, path, Some(needle.to_string()), reply);
    }

    /// Serve a depth-1 listing of `folder` (an absolute href ending in `/`),
    /// with the folder row first.
    pub fn listing(&self, folder: &str, template: Option<&str>, children: Vec<Value>) {
        let name = folder
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let mut rows = vec![serde_json::json!({
            "name": name,
            "href": folder,
            "iscollection": true,
            "templateName": template,
        })];
        rows.extend(children);
        self.on(
            Method::GET,
            &format!("{folder}_DAV/PROPFIND"),
            Reply::json(Value::Array(rows)),
        );
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("lock").clone()
    }

    /// Requests other than listings.
    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| !r.path.ends_with("_DAV/PROPFIND"))
            .collect()
    }

    /// Paths of the listings requested, in order.
    pub fn listed(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| r.path.strip_suffix("_DAV/PROPFIND").map(str::to_string))
            .collect()
    }

    /// Configuration pointing at this server.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.base_url = self.base_url.clone();
        config.account.root = ROOT.to_string();
        config
    }

    /// A client for this server.
    pub fn client(&self, config: &AppConfig) -> Arc<DavHttpClient> {
        Arc::new(DavHttpClient::new(config).expect("client"))
    }

    /// A fresh browser context at the account root.
    pub fn context(&self, config: &AppConfig) -> BrowserContext {
        BrowserContext::new(&config.account)
    }

    fn push(&self, method: Method, path: &str, body_contains: Option<String>, reply: Reply) {
        self.state.rules.lock().expect("lock").push(Rule {
            method,
            path: path.to_string(),
            body_contains,
            reply,
        });
    }
}

/// Listing row for a folder.
pub fn dir(name: &str, href: &str) -> Value {
    serde_json::json!({ "name": name, "href": href, "iscollection": true })
}

/// Listing row for a file.
pub fn file(name: &str, href: &str, length: u64) -> Value {
    serde_json::json!({
        "name": name,
        "href": href,
        "iscollection": false,
        "contentLength": length,
        "contentType": "text/plain",
    })
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let reply = state
        .rules
        .lock()
        .expect("lock")
        .iter()
        .find(|rule| {
            rule.method == method
                && rule.path == recorded.path
                && rule
                    .body_contains
                    .as_deref()
                    .is_none_or(|needle| recorded.body.contains(needle))
        })
        .map(|rule| rule.reply.clone());
    state.requests.lock().expect("lock").push(recorded);

    let Some(reply) = reply else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut response = (
        reply.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response();
    for (name, value) in reply.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(&value),
        ) {
            response.headers_mut().append(name, value);
        }
    }
    response
}

/// A view that keeps what it was shown.
#[derive(Debug)]
pub struct CollectingView {
    pub listings: Vec<(String, Vec<String>)>,
    pub fragments: Vec<String>,
    pub renamed: Vec<(String, String)>,
    pub removed: Vec<String>,
    pub previews: Vec<String>,
    pub progress: Vec<UploadProgress>,
    pub notices: Vec<Notice>,
    pub confirm_answer: bool,
}

impl Default for CollectingView {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            fragments: Vec::new(),
            renamed: Vec::new(),
            removed: Vec::new(),
            previews: Vec::new(),
            progress: Vec::new(),
            notices: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl BrowserView for CollectingView {
    fn render_children(&mut self, _parent: Option<NodeId>, _children: &[TreeNode]) {}

    fn render_listing(&mut self, folder: &ResourcePath, entries: &[FileEntry]) {
        let names = entries.iter().map(|e| e.name.clone()).collect();
        self.listings.push((folder.to_string(), names));
    }

    fn highlight(&mut self, _node: Option<NodeId>, _folder: &ResourcePath) {}

    fn set_fragment(&mut self, fragment: &str) {
        self.fragments.push(fragment.to_string());
    }

    fn rename_row(&mut self, from: &ResourcePath, to: &ResourcePath) {
        self.renamed.push((from.to_string(), to.to_string()));
    }

    fn remove_row(&mut self, path: &ResourcePath) {
        self.removed.push(path.to_string());
    }

    fn open_preview(&mut self, url: &str) {
        self.previews.push(url.to_string());
    }

    fn upload_progress(&mut self, progress: &UploadProgress) {
        self.progress.push(progress.clone());
    }

    fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirm_answer
    }
}
