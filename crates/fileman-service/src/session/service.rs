//! Login, logout and the current user.

use std::sync::Arc;

use tracing::info;

use fileman_core::config::{AfterLogin, SessionConfig};
use fileman_core::traits::DavClient;
use fileman_core::types::{LoginRedirect, SessionUser};
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;

/// Tracks who is signed in.
#[derive(Debug, Clone)]
pub struct SessionService {
    dav: Arc<dyn DavClient>,
    config: SessionConfig,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(dav: Arc<dyn DavClient>, config: SessionConfig) -> Self {
        Self { dav, config }
    }

    /// User named by the session cookie, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.dav
            .session_cookie()
            .and_then(|cookie| SessionUser::from_cookie(&cookie))
    }

    /// Re-read the session cookie into the context.
    pub fn refresh_user(&self, ctx: &mut BrowserContext) -> Option<SessionUser> {
        let user = self.current_user();
        ctx.set_user(user.clone());
        user
    }

    /// Sign in and decide where to go next.
    pub async fn login(
        &self,
        ctx: &mut BrowserContext,
        user_name: &str,
        password: &str,
    ) -> AppResult<LoginRedirect> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(AppError::validation("Please enter your user name"));
        }

        let response = self.dav.login(user_name, password).await?;
        if !response.status {
            return Err(AppError::authentication(
                "Login failed. Please check your user name and password",
            ));
        }

        let user = self.refresh_user(ctx);
        info!(user = user_name, "Logged in");
        Ok(redirect_after_login(
            &self.config.after_login,
            response.next_href.as_deref(),
            user.as_ref(),
        ))
    }

    /// Sign out and forget the user.
    pub async fn logout(&self, ctx: &mut BrowserContext) -> AppResult<()> {
        self.dav.logout().await?;
        ctx.set_user(None);
        info!("Logged out");
        Ok(())
    }
}

/// Apply the post-login policy.
pub fn redirect_after_login(
    policy: &AfterLogin,
    next_href: Option<&str>,
    user: Option<&SessionUser>,
) -> LoginRedirect {
    match policy {
        AfterLogin::Server => match next_href.filter(|h| !h.is_empty()) {
            Some(href) => LoginRedirect::Navigate(href.to_string()),
            None => LoginRedirect::Reload,
        },
        AfterLogin::Reload => LoginRedirect::Reload,
        AfterLogin::Stay => LoginRedirect::Stay,
        AfterLogin::Absolute(path) => LoginRedirect::Navigate(path.clone()),
        AfterLogin::RelativeToUser(path) => match user {
            Some(user) => LoginRedirect::Navigate(format!("{}{path}", user.url)),
            None => LoginRedirect::Navigate(path.clone()),
        },
    }
}
