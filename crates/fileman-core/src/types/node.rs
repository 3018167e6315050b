//! Folder tree nodes.

use serde::{Deserialize, Serialize};

use super::entry::FileEntry;
use super::id::NodeId;
use super::path::ResourcePath;

/// A collection as shown in the folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Registry-assigned id.
    pub id: NodeId,
    /// Folder path relative to the account root.
    pub path: ResourcePath,
    /// Display name.
    pub name: String,
    /// Always true for nodes built from listings; kept for the view.
    pub is_collection: bool,
    /// Template the folder was created from.
    pub template_name: Option<String>,
    /// Templates that may be created inside the folder.
    pub allowed_template_names: Vec<String>,
}

impl TreeNode {
    /// Build a node from a listing row and its assigned id.
    pub fn from_entry(id: NodeId, path: ResourcePath, entry: &FileEntry) -> Self {
        Self {
            id,
            path,
            name: entry.name.clone(),
            is_collection: entry.is_collection,
            template_name: entry.template_name.clone(),
            allowed_template_names: entry.allowed_template_names.clone(),
        }
    }
}
