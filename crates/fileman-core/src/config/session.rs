//! Session cookie and login configuration.

use serde::{Deserialize, Serialize};

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie holding the current user's profile URL.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path the login and logout forms are posted to.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Form field carrying the user name.
    #[serde(default = "default_username_field")]
    pub username_field: String,
    /// Form field carrying the password.
    #[serde(default = "default_password_field")]
    pub password_field: String,
    /// Where to go after a successful login.
    #[serde(default)]
    pub after_login: AfterLogin,
    /// Cookie header value (`name=value; ...`) to start the session with,
    /// for resuming a login made elsewhere.
    #[serde(default)]
    pub cookie: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            login_path: default_login_path(),
            username_field: default_username_field(),
            password_field: default_password_field(),
            after_login: AfterLogin::default(),
            cookie: None,
        }
    }
}

/// Post-login redirect policy.
///
/// Deserialized from a plain string: `""`/absent is [`AfterLogin::Server`],
/// `"reload"`, `"none"`, an absolute path, or a path relative to the
/// user's profile URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum AfterLogin {
    /// Follow `nextHref` from the login response, else reload.
    #[default]
    Server,
    /// Always reload the current page.
    Reload,
    /// Stay where we are.
    Stay,
    /// Go to this absolute path.
    Absolute(String),
    /// Go to this path under the user's profile URL.
    RelativeToUser(String),
}

impl From<Option<String>> for AfterLogin {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None | Some("") => Self::Server,
            Some("reload") => Self::Reload,
            Some("none") => Self::Stay,
            Some(p) if p.starts_with('/') => Self::Absolute(p.to_string()),
            Some(p) => Self::RelativeToUser(p.to_string()),
        }
    }
}

impl From<AfterLogin> for Option<String> {
    fn from(value: AfterLogin) -> Self {
        match value {
            AfterLogin::Server => None,
            AfterLogin::Reload => Some("reload".to_string()),
            AfterLogin::Stay => Some("none".to_string()),
            AfterLogin::Absolute(p) | AfterLogin::RelativeToUser(p) => Some(p),
        }
    }
}

fn default_cookie_name() -> String {
    "miltonUserUrl".to_string()
}

fn default_login_path() -> String {
    "/.dologin".to_string()
}

fn default_username_field() -> String {
    "_loginUserName".to_string()
}

fn default_password_field() -> String {
    "_loginPassword".to_string()
}
