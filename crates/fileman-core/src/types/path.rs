//! Resource paths and the string helpers that pick them apart.
//!
//! A [`ResourcePath`] is always relative to the account root and never
//! starts with `/`. Folders end with `/`; files never do. The empty path
//! is the account root itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A slash-delimited path relative to the account root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The account root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Normalize any presentation of a path: absolute URL, absolute path
    /// including the account root, or an already relative path.
    pub fn from_href(href: &str, account_root: &str) -> Self {
        let path = strip_host(href);
        let root = account_root.trim_end_matches('/');
        let path = match path.strip_prefix(root) {
            Some(rest) if !root.is_empty() && (rest.is_empty() || rest.starts_with('/')) => rest,
            _ => path,
        };
        Self(path.trim_start_matches('/').to_string())
    }

    /// A relative path taken as-is apart from leading slashes.
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self(path.trim_start_matches('/').to_string())
    }

    /// A folder path: like [`ResourcePath::new`] with a trailing `/`
    /// enforced (except for the root).
    pub fn folder(path: impl Into<String>) -> Self {
        let mut path = Self::new(path).0;
        if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        Self(path)
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the account root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this path is in folder form.
    pub fn is_folder(&self) -> bool {
        self.is_root() || self.0.ends_with('/')
    }

    /// The last segment, ignoring a trailing slash.
    pub fn name(&self) -> &str {
        file_name(&self.0)
    }

    /// The parent folder in folder form. The root is its own parent.
    pub fn parent(&self) -> Self {
        Self::folder(parent_href(&self.0))
    }

    /// Child folder of this folder.
    pub fn child_folder(&self, name: &str) -> Self {
        Self::folder(format!("{}{}", self.as_folder_prefix(), name))
    }

    /// Child file of this folder.
    pub fn child_file(&self, name: &str) -> Self {
        Self(format!("{}{}", self.as_folder_prefix(), name))
    }

    /// Same location under a new final name, keeping the folder/file form.
    pub fn renamed(&self, new_name: &str) -> Self {
        let parent = self.parent();
        if self.is_folder() {
            parent.child_folder(new_name)
        } else {
            parent.child_file(new_name)
        }
    }

    /// Non-empty segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Whether `self` equals `ancestor` or lies beneath it.
    pub fn is_within(&self, ancestor: &ResourcePath) -> bool {
        ancestor.is_root() || self.0.starts_with(ancestor.as_folder_prefix().as_str())
    }

    /// Absolute server path: account root + this path.
    pub fn to_server_path(&self, account_root: &str) -> String {
        format!("{}/{}", account_root.trim_end_matches('/'), self.0)
    }

    fn as_folder_prefix(&self) -> String {
        if self.is_root() || self.0.ends_with('/') {
            self.0.clone()
        } else {
            format!("{}/", self.0)
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The last name in a path, taken literally. A trailing slash is ignored.
///
/// `file_name("a/b/c.txt") == "c.txt"`, `file_name("a/b/") == "b"`.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// The last name in a URL: the fragment is dropped before the name is
/// taken. Only for hrefs that are URLs; resource names keep their `#`.
///
/// `url_file_name("/a/page.html#top") == "page.html"`.
pub fn url_file_name(url: &str) -> &str {
    let without_fragment = match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    };
    file_name(without_fragment)
}

/// The parent of an href, without a trailing slash.
///
/// `parent_href("a/b/c") == "a/b"`, `parent_href("a/b/") == "a"`,
/// `parent_href("a") == ""`.
pub fn parent_href(href: &str) -> &str {
    let trimmed = href.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[..pos],
        None => "",
    }
}

/// Lower-cased extension of a name, or `""` when there is none.
///
/// A leading dot does not start an extension: `extension(".profile") == ""`.
pub fn extension(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => name[pos + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// A folder href for display: the trailing slash removed.
pub fn display_folder(href: &str) -> &str {
    href.strip_suffix('/').unwrap_or(href)
}

/// Drop `scheme://host[:port]` from an absolute URL; other input is returned
/// unchanged. `strip_host("http://a.com/x/y") == "/x/y"`.
pub fn strip_host(url: &str) -> &str {
    if !url.starts_with("http") {
        return url;
    }
    let Some(scheme_end) = url.find("://") else {
        return url;
    };
    let after_scheme = &url[scheme_end + 3..];
    match after_scheme.find('/') {
        Some(pos) => &after_scheme[pos..],
        None => "/",
    }
}

/// Strip one leading and one trailing double quote.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
