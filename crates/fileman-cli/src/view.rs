//! Terminal rendering of the folder tree and the listing.

use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use fileman_core::format::{display_date, file_size};
use fileman_core::traits::{BrowserView, Notice};
use fileman_core::types::path::display_folder;
use fileman_core::types::{FileEntry, NodeId, ResourcePath, TreeNode, UploadProgress};

use crate::output::{self, OutputFormat};

/// One listing row for table output.
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Name, with a trailing `/` for folders.
    pub name: String,
    /// File type, plus the template of a managed folder.
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    pub file_type: String,
    /// Human-readable size.
    pub size: String,
    /// Last modification date.
    pub modified: String,
    /// Server href.
    pub href: String,
    #[tabled(skip)]
    pub icon: String,
    /// Server-rendered preview image; files only.
    #[tabled(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl EntryRow {
    /// Row for `entry` listed in `folder`.
    pub fn new(entry: &FileEntry, account_root: &str, folder: &ResourcePath) -> Self {
        let (name, file_type, preview) = if entry.is_collection {
            let file_type = match entry.template_name.as_deref() {
                Some(template) if !entry.is_plain_folder() => format!("folder ({template})"),
                _ => entry.file_type().to_string(),
            };
            (format!("{}/", entry.name), file_type, None)
        } else {
            (
                entry.name.clone(),
                entry.file_type().to_string(),
                Some(entry.preview_url(account_root, folder)),
            )
        };
        Self {
            name,
            file_type,
            size: entry.content_length.map(file_size).unwrap_or_default(),
            modified: entry
                .modified_date
                .as_ref()
                .map(display_date)
                .unwrap_or_default(),
            href: entry.href.clone(),
            icon: entry.icon(),
            preview,
        }
    }
}

/// Prints what the services show.
///
/// Listings are printed only while `show_listing` is on, so commands can
/// load a folder quietly before acting on it.
#[derive(Debug)]
pub struct TerminalView {
    format: OutputFormat,
    assume_yes: bool,
    account_root: String,
    /// Print listings.
    pub show_listing: bool,
}

impl TerminalView {
    /// A view printing listings in `format` for the account at
    /// `account_root`.
    pub fn new(format: OutputFormat, assume_yes: bool, account_root: impl Into<String>) -> Self {
        Self {
            format,
            assume_yes,
            account_root: account_root.into(),
            show_listing: true,
        }
    }
}

impl BrowserView for TerminalView {
    fn render_children(&mut self, parent: Option<NodeId>, children: &[TreeNode]) {
        debug!(parent = ?parent, children = children.len(), "Tree level loaded");
    }

    fn render_listing(&mut self, folder: &ResourcePath, entries: &[FileEntry]) {
        if !self.show_listing {
            return;
        }
        if self.format == OutputFormat::Table {
            println!("/{}", display_folder(folder.as_str()));
        }
        let rows: Vec<EntryRow> = entries
            .iter()
            .map(|entry| EntryRow::new(entry, &self.account_root, folder))
            .collect();
        output::print_list(&rows, self.format);
    }

    fn highlight(&mut self, node: Option<NodeId>, folder: &ResourcePath) {
        debug!(node = ?node, folder = %folder, "Selected folder");
    }

    fn set_fragment(&mut self, fragment: &str) {
        debug!(fragment, "Location changed");
    }

    fn rename_row(&mut self, from: &ResourcePath, to: &ResourcePath) {
        output::print_success(&format!("Moved '{from}' to '{to}'"));
    }

    fn remove_row(&mut self, path: &ResourcePath) {
        output::print_success(&format!("Deleted '{path}'"));
    }

    fn open_preview(&mut self, url: &str) {
        output::print_kv("Preview", url);
    }

    fn upload_progress(&mut self, progress: &UploadProgress) {
        eprint!("\r  {:<40} {:>3}%", progress.file_name, progress.percent());
        if progress.sent >= progress.total {
            eprintln!();
        }
    }

    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::Info(m) => output::print_success(&m),
            Notice::Warning(m) => output::print_warning(&m),
            Notice::Error(m) => output::print_error(&m),
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
