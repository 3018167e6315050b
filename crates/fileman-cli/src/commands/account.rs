//! Quota, account and form commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use fileman_core::format::file_size;
use fileman_core::{AppError, AppResult};
use fileman_service::{FieldRule, FormRules};

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Enable a user account
    Enable {
        /// Profile href, e.g. `/users/bob/`
        user: String,
    },
    /// Disable a user account
    Disable {
        /// Profile href, e.g. `/users/bob/`
        user: String,
    },
}

/// Arguments for `post`
#[derive(Debug, Args)]
pub struct PostArgs {
    /// Form URL
    pub url: String,
    /// Fields as `name=value`
    #[arg(value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
    /// Field that must not be blank (repeatable)
    #[arg(long = "require", value_name = "FIELD")]
    pub required: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UsageReport {
    used: u64,
    available: u64,
    total: u64,
    percent_used: Option<u32>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Show storage usage of the account root.
pub async fn usage(app: &mut App) -> AppResult<()> {
    let summary = app.account.quota(&app.ctx).await?;
    match app.format {
        OutputFormat::Table => {
            output::print_kv("Used", &file_size(summary.quota.used));
            output::print_kv("Total", &format!("{:.2} GB", summary.total_gigabytes));
            output::print_kv("Usage", &summary.usage_label());
        }
        OutputFormat::Json => output::print_item(
            &UsageReport {
                used: summary.quota.used,
                available: summary.quota.available,
                total: summary.quota.total(),
                percent_used: summary.percent_used,
            },
            app.format,
        ),
    }
    Ok(())
}

/// Execute account commands
pub async fn execute(app: &mut App, args: &AccountArgs) -> AppResult<()> {
    let (user, disabled) = match &args.command {
        AccountCommand::Enable { user } => (user, false),
        AccountCommand::Disable { user } => (user, true),
    };
    app.account.set_account_disabled(user, disabled).await?;
    let state = if disabled { "disabled" } else { "enabled" };
    output::print_success(&format!("Account '{user}' {state}"));
    Ok(())
}

/// Submit a form and print the reply.
pub async fn post(app: &mut App, args: &PostArgs) -> AppResult<()> {
    if args.url.trim().is_empty() {
        return Err(AppError::validation("A form URL is required"));
    }
    let rules = args
        .required
        .iter()
        .fold(FormRules::infer(&args.fields), |rules, field| {
            rules.with(field.as_str(), FieldRule::Required)
        });
    let response = app
        .forms
        .submit_checked(&mut app.view, &args.url, &args.fields, &rules)
        .await?;
    match response.next_href.as_deref() {
        Some(next) if app.format == OutputFormat::Table => output::print_kv("Next", next),
        _ if app.format == OutputFormat::Json => output::print_item(&response, app.format),
        _ => output::print_success("Submitted"),
    }
    Ok(())
}
