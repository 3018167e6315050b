//! Storage usage and account enable/disable.

use std::sync::Arc;

use tracing::info;

use fileman_core::traits::DavClient;
use fileman_core::types::{Quota, ResourcePath};
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;

/// Property toggled to disable an account.
const ACCOUNT_DISABLED_PROPERTY: &str = "clyde:accountDisabled";

/// Quota as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaSummary {
    /// Raw figures.
    pub quota: Quota,
    /// Rounded percentage, `None` when the total is unknown.
    pub percent_used: Option<u32>,
    /// Total in decimal gigabytes.
    pub total_gigabytes: f64,
}

impl QuotaSummary {
    /// `"42%"` or `"Unknown"`.
    pub fn usage_label(&self) -> String {
        match self.percent_used {
            Some(p) => format!("{p}%"),
            None => "Unknown".to_string(),
        }
    }
}

/// Account-level operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    dav: Arc<dyn DavClient>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(dav: Arc<dyn DavClient>) -> Self {
        Self { dav }
    }

    /// Quota of the account root.
    pub async fn quota(&self, ctx: &BrowserContext) -> AppResult<QuotaSummary> {
        let quota = self.dav.quota(&ctx.server_href(&ResourcePath::root())).await?;
        Ok(QuotaSummary {
            quota,
            percent_used: quota.percent_used(),
            total_gigabytes: quota.total_gigabytes(),
        })
    }

    /// Enable or disable the account whose profile lives at `user_href`.
    pub async fn set_account_disabled(&self, user_href: &str, disabled: bool) -> AppResult<()> {
        let properties = [(ACCOUNT_DISABLED_PROPERTY.to_string(), disabled.to_string())];
        let failures = self.dav.prop_patch(user_href, &properties).await?;
        if let Some(failure) = failures.first() {
            let reason = failure
                .description
                .clone()
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(AppError::rejected(format!(
                "The user could not be updated because: {reason}"
            )));
        }
        info!(user = user_href, disabled, "Updated account state");
        Ok(())
    }
}
