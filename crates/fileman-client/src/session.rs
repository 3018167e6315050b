//! Login, logout and the session cookie.

use reqwest::cookie::CookieStore;
use tracing::debug;

use fileman_core::AppResult;
use fileman_core::types::LoginResponse;

use crate::client::DavHttpClient;

impl DavHttpClient {
    /// Post credentials to the login path.
    pub async fn post_login(&self, user_name: &str, password: &str) -> AppResult<LoginResponse> {
        let url = self.url(&self.session.login_path)?;
        debug!(url = %url, user_name, "Posting login");
        let form = [
            (self.session.username_field.as_str(), user_name),
            (self.session.password_field.as_str(), password),
        ];
        self.send_json(self.http.post(url).form(&form)).await
    }

    /// Post `miltonLogout=true` to the login path.
    pub async fn post_logout(&self) -> AppResult<()> {
        let url = self.url(&self.session.login_path)?;
        debug!(url = %url, "Posting logout");
        self.send(self.http.post(url).form(&[("miltonLogout", "true")]))
            .await?;
        Ok(())
    }

    /// Raw value of the configured session cookie for the base URL.
    pub fn cookie_value(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        find_cookie(header, &self.session.cookie_name).map(str::to_string)
    }

    /// Every cookie held for the base URL, as a `Cookie` header value.
    /// Feeding it back through `session.cookie` resumes the session.
    pub fn cookie_header(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        header.to_str().ok().map(str::to_string)
    }
}

/// Value of cookie `name` in a `Cookie` header.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
