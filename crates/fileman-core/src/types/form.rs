//! Responses from JSON form endpoints.

use serde::{Deserialize, Serialize};

/// Message shown when a rejected form carries no messages of its own.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Sorry, we couldnt process your request";

/// A validation message tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    /// Field name.
    #[serde(default)]
    pub field: String,
    /// Message text.
    #[serde(default)]
    pub message: String,
}

/// `{status, messages, fieldMessages}` as returned by form endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    /// Application-level success flag.
    #[serde(default)]
    pub status: bool,
    /// General messages.
    #[serde(default)]
    pub messages: Vec<String>,
    /// Per-field messages.
    #[serde(default)]
    pub field_messages: Vec<FieldMessage>,
    /// Where to go next, when the server says.
    #[serde(default)]
    pub next_href: Option<String>,
}

impl FormResponse {
    /// Messages to show on rejection, never empty.
    pub fn rejection_messages(&self) -> Vec<String> {
        if self.messages.is_empty() {
            vec![DEFAULT_REJECTION_MESSAGE.to_string()]
        } else {
            self.messages.clone()
        }
    }
}

/// One element of a PROPPATCH response; present only for failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropPatchFailure {
    /// Property that could not be set.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable reason.
    #[serde(default)]
    pub description: Option<String>,
}
