//! JSON form submission.

use std::sync::Arc;

use tracing::{info, warn};

use fileman_core::traits::{BrowserView, DavClient, Notice};
use fileman_core::types::{FieldMessage, FormResponse};
use fileman_core::validation::{parse_date, validate_email, validate_password_match};
use fileman_core::{AppError, AppResult};

/// A check run on one field before a form is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Must not be blank.
    Required,
    /// An email address, when filled in.
    Email,
    /// A `dd/mm/yyyy` date, when filled in.
    Date,
    /// Must repeat the named password field.
    Confirms(String),
}

/// Field checks for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRules {
    rules: Vec<(String, FieldRule)>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rule` for `field`.
    pub fn with(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((field.into(), rule));
        self
    }

    /// Rules implied by field names: `email` and `*Email` hold addresses,
    /// `date` and `*Date` hold dates, and `confirmX` repeats field `x`.
    pub fn infer(fields: &[(String, String)]) -> Self {
        let mut rules = Self::new();
        for (name, _) in fields {
            if name == "email" || name.ends_with("Email") {
                rules = rules.with(name.clone(), FieldRule::Email);
            } else if name == "date" || name.ends_with("Date") {
                rules = rules.with(name.clone(), FieldRule::Date);
            } else if let Some(target) = confirmed_field(name) {
                if fields.iter().any(|(other, _)| *other == target) {
                    rules = rules.with(name.clone(), FieldRule::Confirms(target));
                }
            }
        }
        rules
    }

    /// One message per failed rule, in rule order.
    pub fn check(&self, fields: &[(String, String)]) -> Vec<FieldMessage> {
        self.rules
            .iter()
            .filter_map(|(field, rule)| {
                let current = field_value(fields, field);
                let result = match rule {
                    FieldRule::Required if current.is_empty() => {
                        Err(AppError::validation("This field is required"))
                    }
                    FieldRule::Email if !current.is_empty() => validate_email(current),
                    FieldRule::Date if !current.is_empty() => parse_date(current).map(|_| ()),
                    FieldRule::Confirms(other) => {
                        validate_password_match(field_value(fields, other), current)
                    }
                    _ => Ok(()),
                };
                result.err().map(|e| FieldMessage {
                    field: field.clone(),
                    message: e.message,
                })
            })
            .collect()
    }
}

/// Trimmed value of `name`, empty when absent.
fn field_value<'a>(fields: &'a [(String, String)], name: &str) -> &'a str {
    fields
        .iter()
        .find(|(field, _)| field == name)
        .map(|(_, value)| value.trim())
        .unwrap_or_default()
}

/// `confirmPassword` → `password`.
fn confirmed_field(name: &str) -> Option<String> {
    let rest = name.strip_prefix("confirm")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    first
        .is_uppercase()
        .then(|| first.to_lowercase().chain(chars).collect())
}

/// Posts forms and interprets their `{status, messages, fieldMessages}`
/// replies.
#[derive(Debug, Clone)]
pub struct FormService {
    dav: Arc<dyn DavClient>,
}

impl FormService {
    /// Creates a new form service.
    pub fn new(dav: Arc<dyn DavClient>) -> Self {
        Self { dav }
    }

    /// Submit `fields` to `url`, checking the rules their names imply.
    pub async fn submit(
        &self,
        view: &mut dyn BrowserView,
        url: &str,
        fields: &[(String, String)],
    ) -> AppResult<FormResponse> {
        self.submit_checked(view, url, fields, &FormRules::infer(fields))
            .await
    }

    /// Submit `fields` to `url` once `rules` pass.
    ///
    /// Failed rules are shown as error notices and nothing is sent. A reply
    /// with `status: false` becomes a `Rejected` error; each general and
    /// per-field message is also shown as an error notice.
    pub async fn submit_checked(
        &self,
        view: &mut dyn BrowserView,
        url: &str,
        fields: &[(String, String)],
        rules: &FormRules,
    ) -> AppResult<FormResponse> {
        let failures = rules.check(fields);
        if !failures.is_empty() {
            for failure in &failures {
                view.notice(Notice::Error(format!("{}: {}", failure.field, failure.message)));
            }
            let summary: Vec<String> = failures
                .iter()
                .map(|f| format!("{}: {}", f.field, f.message))
                .collect();
            return Err(AppError::validation(summary.join(", ")));
        }

        let response = match self.dav.submit_form(url, fields).await {
            Ok(response) => response,
            Err(e) => {
                view.notice(Notice::Error(format!("Error submitting form: {}", e.message)));
                return Err(e);
            }
        };

        if response.status {
            info!(url, "Form accepted");
            return Ok(response);
        }

        let messages = response.rejection_messages();
        for message in &messages {
            view.notice(Notice::Error(message.clone()));
        }
        for field in &response.field_messages {
            view.notice(Notice::Error(format!("{}: {}", field.field, field.message)));
        }
        warn!(url, messages = ?messages, "Form rejected");

        let mut summary = messages.join("; ");
        if !response.field_messages.is_empty() {
            let fields: Vec<String> = response
                .field_messages
                .iter()
                .map(|f| format!("{}: {}", f.field, f.message))
                .collect();
            summary.push_str(&format!(" ({})", fields.join(", ")));
        }
        Err(AppError::rejected(summary))
    }
}
