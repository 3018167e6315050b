//! Depth-1 folder listings feeding the tree and the file grid.

use std::sync::Arc;

use tracing::{debug, info, warn};

use fileman_core::traits::{BrowserView, DavClient, Notice};
use fileman_core::types::{FileEntry, NodeId, ResourcePath, TreeNode, is_plain_template};
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;

/// One fetched folder after filtering and id assignment.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Folder that was listed, in folder form.
    pub folder: ResourcePath,
    /// Template of the folder itself.
    pub template: Option<String>,
    /// Visible children in server order.
    pub entries: Vec<FileEntry>,
    /// Visible collection children with their node ids.
    pub folders: Vec<TreeNode>,
}

/// Loads folder listings into the context and the view.
#[derive(Debug, Clone)]
pub struct FolderLoader {
    dav: Arc<dyn DavClient>,
}

impl FolderLoader {
    /// Creates a new folder loader.
    pub fn new(dav: Arc<dyn DavClient>) -> Self {
        Self { dav }
    }

    /// Make `folder` the current folder: list it, fill the grid, highlight
    /// it in the tree and update the fragment.
    ///
    /// On failure an error notice is shown and nothing else changes.
    pub async fn load(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        folder: &ResourcePath,
    ) -> AppResult<Listing> {
        let listing = match self.fetch(ctx, folder).await {
            Ok(listing) => listing,
            Err(e) => {
                view.notice(Notice::Error(format!(
                    "Could not load folder '{folder}': {}",
                    e.message
                )));
                return Err(e);
            }
        };

        let folder_id = self.node_id(ctx, &listing.folder);
        view.render_children(folder_id, &listing.folders);
        view.render_listing(&listing.folder, &listing.entries);
        ctx.set_current_folder(listing.folder.clone(), listing.template.clone());
        view.highlight(folder_id, &listing.folder);
        view.set_fragment(listing.folder.as_str());

        if !is_plain_template(listing.template.as_deref()) {
            view.open_preview(&format!("{}index.html", ctx.server_href(&listing.folder)));
        }

        info!(
            folder = %listing.folder,
            entries = listing.entries.len(),
            "Loaded folder"
        );
        Ok(listing)
    }

    /// Reload the current folder.
    pub async fn refresh(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
    ) -> AppResult<Listing> {
        let folder = ctx.current_folder().clone();
        self.load(ctx, view, &folder).await
    }

    /// Lazy-load the children of a tree node without changing the current
    /// folder.
    pub async fn expand(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        node: NodeId,
    ) -> AppResult<Vec<TreeNode>> {
        let folder = ctx
            .registry
            .resolve(node)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Unknown tree node '{node}'")))?;
        self.expand_path(ctx, view, Some(node), &folder).await
    }

    /// Lazy-load the top level of the tree.
    pub async fn expand_root(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
    ) -> AppResult<Vec<TreeNode>> {
        self.expand_path(ctx, view, None, &ResourcePath::root()).await
    }

    async fn expand_path(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        node: Option<NodeId>,
        folder: &ResourcePath,
    ) -> AppResult<Vec<TreeNode>> {
        let listing = match self.fetch(ctx, folder).await {
            Ok(listing) => listing,
            Err(e) => {
                view.notice(Notice::Error(format!(
                    "Could not expand '{folder}': {}",
                    e.message
                )));
                return Err(e);
            }
        };
        view.render_children(node, &listing.folders);
        debug!(folder = %folder, children = listing.folders.len(), "Expanded tree node");
        Ok(listing.folders)
    }

    /// PROPFIND, drop the folder row, filter, and register collections.
    async fn fetch(&self, ctx: &mut BrowserContext, folder: &ResourcePath) -> AppResult<Listing> {
        let folder = ResourcePath::folder(folder.as_str());
        let href = ctx.server_href(&folder);
        let mut rows = self.dav.list(&href).await?.into_iter();

        let template = match rows.next() {
            Some(own) => own.template_name,
            None => {
                warn!(folder = %folder, "Listing came back without the folder row");
                None
            }
        };

        let entries = ctx.filter.apply(rows.collect());
        let account_root = ctx.account_root().to_string();
        let folders = entries
            .iter()
            .filter(|entry| entry.is_collection)
            .map(|entry| {
                let path = entry.path(&account_root);
                let id = ctx.registry.assign(path.as_str());
                TreeNode::from_entry(id, path, entry)
            })
            .collect();

        Ok(Listing {
            folder,
            template,
            entries,
            folders,
        })
    }

    fn node_id(&self, ctx: &BrowserContext, folder: &ResourcePath) -> Option<NodeId> {
        if folder.is_root() {
            None
        } else {
            ctx.registry.resolve_id(folder.as_str())
        }
    }
}
