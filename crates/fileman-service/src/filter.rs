//! Which listing rows are shown.

use tracing::trace;

use fileman_core::config::AccountConfig;
use fileman_core::types::FileEntry;
use fileman_core::types::path::{strip_host, url_file_name};

/// System artifacts that are never listed.
pub const SYSTEM_DENYLIST: &[&str] = &["Thumbs.db", "*/regs/", "*.MOI", "*.THM", "_sys_*"];

/// One denylist pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyRule {
    /// The file name equals this.
    Name(String),
    /// The file name starts with this.
    NamePrefix(String),
    /// The href ends with this.
    HrefSuffix(String),
}

impl DenyRule {
    /// Parse `name`, `prefix*` or `*suffix`.
    pub fn parse(pattern: &str) -> Self {
        if let Some(suffix) = pattern.strip_prefix('*') {
            Self::HrefSuffix(suffix.to_string())
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            Self::NamePrefix(prefix.to_string())
        } else {
            Self::Name(pattern.to_string())
        }
    }

    fn matches(&self, href: &str, name: &str) -> bool {
        match self {
            Self::Name(n) => name == n,
            Self::NamePrefix(p) => name.starts_with(p.as_str()),
            Self::HrefSuffix(s) => href.ends_with(s.as_str()),
        }
    }
}

/// Drops excluded and system entries from listings.
#[derive(Debug, Clone)]
pub struct ListingFilter {
    /// Account root without a trailing slash.
    root: String,
    excluded_paths: Vec<String>,
    denylist: Vec<DenyRule>,
}

impl ListingFilter {
    /// Build a filter from the account settings.
    pub fn new(account: &AccountConfig) -> Self {
        Self {
            root: account.root.trim_end_matches('/').to_string(),
            excluded_paths: account.excluded_paths.clone(),
            denylist: SYSTEM_DENYLIST
                .iter()
                .copied()
                .chain(account.extra_denylist.iter().map(String::as_str))
                .map(DenyRule::parse)
                .collect(),
        }
    }

    /// Whether `href` lies under an excluded prefix.
    pub fn is_excluded(&self, href: &str) -> bool {
        let href = strip_host(href);
        self.excluded_paths
            .iter()
            .any(|prefix| href.starts_with(&format!("{}{}", self.root, prefix)))
    }

    /// Whether `href` (or the entry `name`) hits the denylist.
    pub fn is_denied(&self, href: &str, name: &str) -> bool {
        let href_name = url_file_name(href);
        self.denylist
            .iter()
            .any(|rule| rule.matches(href, href_name) || rule.matches(href, name))
    }

    /// Whether the entry should be shown.
    pub fn is_displayable(&self, entry: &FileEntry) -> bool {
        !self.is_excluded(&entry.href) && !self.is_denied(&entry.href, &entry.name)
    }

    /// Visible entries, order preserved.
    pub fn apply(&self, entries: Vec<FileEntry>) -> Vec<FileEntry> {
        entries
            .into_iter()
            .filter(|entry| {
                let keep = self.is_displayable(entry);
                if !keep {
                    trace!(href = %entry.href, "Hiding entry");
                }
                keep
            })
            .collect()
    }
}
