//! The tree + listing view driven by the services.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{FileEntry, NodeId, ResourcePath, TreeNode, UploadProgress};

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    /// Informational.
    Info(String),
    /// Something was skipped or substituted.
    Warning(String),
    /// An operation failed.
    Error(String),
}

impl Notice {
    /// The message text.
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Warning(m) | Self::Error(m) => m,
        }
    }

    /// Whether this is an error notice.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info(m) => write!(f, "{m}"),
            Self::Warning(m) => write!(f, "warning: {m}"),
            Self::Error(m) => write!(f, "error: {m}"),
        }
    }
}

/// Rendering surface for the folder tree and the file listing.
pub trait BrowserView: Send {
    /// Show the collection children of `parent` (`None` for the account root).
    fn render_children(&mut self, parent: Option<NodeId>, children: &[TreeNode]);

    /// Replace the file listing with the contents of `folder`.
    fn render_listing(&mut self, folder: &ResourcePath, entries: &[FileEntry]);

    /// Mark `folder` as selected in the tree.
    fn highlight(&mut self, node: Option<NodeId>, folder: &ResourcePath);

    /// Update the location fragment (the part after `#`).
    fn set_fragment(&mut self, fragment: &str);

    /// Rename a row in place.
    fn rename_row(&mut self, from: &ResourcePath, to: &ResourcePath);

    /// Remove a row.
    fn remove_row(&mut self, path: &ResourcePath);

    /// Open a preview or editor for `url`.
    fn open_preview(&mut self, url: &str);

    /// Report upload progress.
    fn upload_progress(&mut self, progress: &UploadProgress);

    /// Show a notice.
    fn notice(&mut self, notice: Notice);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
}
