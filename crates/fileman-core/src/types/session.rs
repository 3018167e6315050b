//! Session identity and login payloads.

use serde::{Deserialize, Serialize};

use super::path::{strip_host, strip_quotes};

const USERS_MARKER: &str = "users/";

/// The signed-in user, derived from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Profile URL without scheme or host, e.g. `/users/alice/`.
    pub url: String,
    /// User name, e.g. `alice`.
    pub name: String,
}

impl SessionUser {
    /// Build a user from a raw cookie value.
    ///
    /// One pair of surrounding quotes and any `scheme://host` prefix are
    /// removed. Values of length one or less mean no one is signed in.
    pub fn from_cookie(raw: &str) -> Option<Self> {
        let url = strip_host(strip_quotes(raw.trim()));
        if url.len() <= 1 {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            name: user_name_from_url(url).to_string(),
        })
    }
}

/// Text after the `users/` marker of a profile URL, trailing slash removed.
/// The whole string is returned when the marker is absent.
pub fn user_name_from_url(url: &str) -> &str {
    let url = url.strip_suffix('/').unwrap_or(url);
    match url.find(USERS_MARKER) {
        Some(pos) => &url[pos + USERS_MARKER.len()..],
        None => url,
    }
}

/// Login endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Whether the credentials were accepted.
    #[serde(default)]
    pub status: bool,
    /// Where the server suggests going next.
    #[serde(default)]
    pub next_href: Option<String>,
}

/// What the caller should do after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRedirect {
    /// Navigate to the given URL.
    Navigate(String),
    /// Reload the current page.
    Reload,
    /// Stay where we are.
    Stay,
}
