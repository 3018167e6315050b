//! Account storage usage.

use serde::{Deserialize, Serialize};

/// Quota figures from a depth-0 PROPFIND on the account root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    /// Bytes still available.
    #[serde(default)]
    pub available: u64,
    /// Bytes in use.
    #[serde(default)]
    pub used: u64,
}

impl Quota {
    /// Available plus used.
    pub fn total(&self) -> u64 {
        self.available.saturating_add(self.used)
    }

    /// Rounded percentage used, or `None` when the total is unknown.
    pub fn percent_used(&self) -> Option<u32> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some((self.used as f64 * 100.0 / total as f64).round() as u32)
    }

    /// Total in decimal gigabytes.
    pub fn total_gigabytes(&self) -> f64 {
        self.total() as f64 / 1_000_000_000.0
    }
}
