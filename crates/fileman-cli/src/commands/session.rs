//! Login, logout and identity commands.

use clap::Args;

use fileman_core::types::LoginRedirect;
use fileman_core::{AppError, AppResult};

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// User name; prompted for when omitted
    pub user: Option<String>,
    /// Password; prompted for when omitted
    #[arg(long, env = "FILEMAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Sign in and print the cookie that resumes the session.
pub async fn login(app: &mut App, args: &LoginArgs) -> AppResult<()> {
    let user = match &args.user {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("User name")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let redirect = app.session.login(&mut app.ctx, &user, &password).await?;
    output::print_success(&format!("Logged in as '{}'", user.trim()));
    match redirect {
        LoginRedirect::Navigate(url) => output::print_kv("Next", &url),
        LoginRedirect::Reload | LoginRedirect::Stay => {}
    }
    if let Some(cookie) = app.client.cookie_header() {
        output::print_kv("Session", &format!("FILEMAN__SESSION__COOKIE='{cookie}'"));
    }
    Ok(())
}

/// Sign out.
pub async fn logout(app: &mut App) -> AppResult<()> {
    app.session.logout(&mut app.ctx).await?;
    output::print_success("Logged out");
    Ok(())
}

/// Show who the session cookie names.
pub fn whoami(app: &mut App) -> AppResult<()> {
    match app.ctx.user() {
        Some(user) => match app.format {
            OutputFormat::Table => {
                output::print_kv("User", &user.name);
                output::print_kv("Profile", &user.url);
            }
            OutputFormat::Json => output::print_item(user, app.format),
        },
        None => output::print_warning("Not logged in"),
    }
    Ok(())
}
