//! Bidirectional node id ↔ resource path table.

use std::collections::HashMap;

use fileman_core::types::{NodeId, ResourcePath};

/// Maps tree node ids to resource paths and back.
///
/// Every path is normalized with [`ResourcePath::from_href`] against the
/// account root before it is stored or looked up, so `Documents/` and
/// `/sites/demo/files/Documents/` name the same entry. Ids are handed out in
/// increasing order starting at `node_0` and are never reused.
#[derive(Debug, Clone, Default)]
pub struct NodeIdRegistry {
    account_root: String,
    by_id: HashMap<NodeId, ResourcePath>,
    by_path: HashMap<ResourcePath, NodeId>,
    next_id: NodeId,
}

impl NodeIdRegistry {
    /// Create an empty registry for an account root.
    pub fn new(account_root: impl Into<String>) -> Self {
        Self {
            account_root: account_root.into(),
            ..Self::default()
        }
    }

    /// The account root paths are normalized against.
    pub fn account_root(&self) -> &str {
        &self.account_root
    }

    /// Id for `path`, allocating one on first sight.
    pub fn assign(&mut self, path: &str) -> NodeId {
        let path = self.normalize(path);
        if let Some(id) = self.by_path.get(&path) {
            return *id;
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.by_id.insert(id, path.clone());
        self.by_path.insert(path, id);
        id
    }

    /// Path registered for `id`.
    pub fn resolve(&self, id: NodeId) -> Option<&ResourcePath> {
        self.by_id.get(&id)
    }

    /// Id registered for `path`.
    pub fn resolve_id(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(&self.normalize(path)).copied()
    }

    /// Point the id of `from`, and of every registered path beneath it, at
    /// the corresponding location under `to`. Returns how many entries moved.
    ///
    /// Whatever was registered at or beneath `to` has been replaced on the
    /// server; those ids are forgotten so each path keeps exactly one id.
    pub fn repoint(&mut self, from: &ResourcePath, to: &ResourcePath) -> usize {
        let from = self.normalize(from.as_str());
        let to = self.normalize(to.as_str());

        let moved: Vec<(ResourcePath, NodeId)> = self
            .by_path
            .iter()
            .filter(|(path, _)| covers(&from, path))
            .map(|(path, id)| (path.clone(), *id))
            .collect();
        if moved.is_empty() {
            return 0;
        }
        for (old_path, _) in &moved {
            self.by_path.remove(old_path);
        }

        let stale: Vec<ResourcePath> = self
            .by_path
            .keys()
            .filter(|path| covers(&to, path))
            .cloned()
            .collect();
        for path in stale {
            if let Some(id) = self.by_path.remove(&path) {
                self.by_id.remove(&id);
            }
        }

        for (old_path, id) in &moved {
            let suffix = &old_path.as_str()[from.as_str().len()..];
            let new_path = ResourcePath::new(format!("{}{}", to.as_str(), suffix));
            self.by_path.insert(new_path.clone(), *id);
            self.by_id.insert(*id, new_path);
        }
        moved.len()
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn normalize(&self, path: &str) -> ResourcePath {
        ResourcePath::from_href(path, &self.account_root)
    }
}

/// `path` is `base` itself or, for a non-root folder, lies beneath it.
fn covers(base: &ResourcePath, path: &ResourcePath) -> bool {
    path == base || (base.is_folder() && !base.is_root() && path.is_within(base))
}
