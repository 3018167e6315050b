//! Shared HTTP plumbing: URL building, status checks, JSON decoding.

use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use reqwest::cookie::Jar;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use fileman_core::config::{AppConfig, SessionConfig, UploadConfig};
use fileman_core::types::FormResponse;
use fileman_core::types::path::strip_host;
use fileman_core::{AppError, AppResult, ErrorKind};

/// Characters escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY: usize = 200;

/// DAV client over `reqwest`, holding the session cookie jar.
#[derive(Debug, Clone)]
pub struct DavHttpClient {
    pub(crate) http: Client,
    pub(crate) base_url: Url,
    pub(crate) jar: Arc<Jar>,
    pub(crate) session: SessionConfig,
    pub(crate) upload: UploadConfig,
}

impl DavHttpClient {
    /// Build a client from the application configuration.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.server.base_url).map_err(|e| {
            AppError::configuration(format!(
                "Invalid server.base_url '{}': {e}",
                config.server.base_url
            ))
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session.cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
        }

        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .user_agent(config.server.user_agent.as_str())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        debug!(base_url = %base_url, "DAV client ready");

        Ok(Self {
            http,
            base_url,
            jar,
            session: config.session.clone(),
            upload: config.upload.clone(),
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a server href. Segments are normalized to
    /// percent-encoded form whether or not the href was already encoded.
    pub fn url(&self, href: &str) -> AppResult<Url> {
        let path = encode_path(strip_host(href));
        self.base_url
            .join(&path)
            .map_err(|e| AppError::validation(format!("Invalid href '{href}': {e}")))
    }

    /// URL of a `_DAV/<operation>` endpoint below `href`.
    pub fn endpoint(&self, href: &str, operation: &str) -> AppResult<Url> {
        let separator = if href.ends_with('/') { "" } else { "/" };
        self.url(&format!("{href}{separator}_DAV/{operation}"))
    }

    /// Send a request and fail on any non-success status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        check_status(response).await
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response body: {e}"),
                e,
            )
        })
    }

    /// Send a mutating request. A JSON body with `"status": false` is turned
    /// into a `Rejected` error; empty and non-JSON bodies count as success.
    pub(crate) async fn send_mutation(&self, request: RequestBuilder) -> AppResult<()> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        check_status_flag(&body)
    }
}

/// Fail when a 2xx body is a status payload reporting `false`.
pub(crate) fn check_status_flag(body: &[u8]) -> AppResult<()> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return Ok(());
    };
    if value.get("status").and_then(serde_json::Value::as_bool) != Some(false) {
        return Ok(());
    }
    let response: FormResponse = serde_json::from_value(value).unwrap_or_default();
    Err(AppError::rejected(response.rejection_messages().join(", ")))
}

/// Map a `reqwest` failure that produced no usable response.
pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Transport, format!("Request failed: {err}"), err)
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
    let message = if snippet.trim().is_empty() {
        format!("{} returned {status}", url.path())
    } else {
        format!("{} returned {status}: {}", url.path(), snippet.trim())
    };
    Err(AppError::http_status(status.as_u16(), message))
}

/// Percent-encode each segment of a path, decoding it first so already
/// encoded hrefs are not double-encoded.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let decoded = percent_decode_str(segment).decode_utf8_lossy();
            utf8_percent_encode(&decoded, SEGMENT).to_string()
        })
        .collect::<Vec<_>>()
        .join("/")
}
