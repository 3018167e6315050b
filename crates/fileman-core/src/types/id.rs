//! Synthetic tree node identifiers.
//!
//! Node ids are process-local and handed out in increasing order by the
//! registry; they are never recycled within a session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const NODE_ID_PREFIX: &str = "node_";

/// Identifier of one node in the folder tree, rendered as `node_<n>`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw sequence number.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub fn raw(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NODE_ID_PREFIX}{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(NODE_ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| AppError::validation(format!("Invalid node id '{s}'")))
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
