//! Account root and listing exclusions.

use serde::{Deserialize, Serialize};

/// The account every resource path is relative to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account root prefix as it appears in server hrefs, e.g.
    /// `/sites/demo/files`. Empty means hrefs are already relative.
    #[serde(default)]
    pub root: String,
    /// Prefixes (relative to the root) hidden from listings.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Patterns hidden on top of the built-in system denylist, which always
    /// applies. `name` matches exactly, `prefix*` matches the start of the
    /// name, `*suffix` matches the end of the href.
    #[serde(default)]
    pub extra_denylist: Vec<String>,
}

