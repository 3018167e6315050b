//! Context-menu actions and row selection.

use serde::Serialize;
use tracing::debug;

use fileman_core::AppResult;
use fileman_core::traits::BrowserView;
use fileman_core::types::{FileEntry, ResourcePath, TreeNode};

use crate::context::BrowserContext;
use crate::folder::FolderLoader;

/// A "new page" menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPageLink {
    /// Template to instantiate.
    pub template: String,
    /// URL that creates the page.
    pub url: String,
}

/// One entry of a tree node's context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "pages", rename_all = "lowercase")]
pub enum MenuAction {
    Delete,
    Refresh,
    Add(Vec<NewPageLink>),
}

/// Menu for a tree node. `Add` appears only when the node allows child
/// templates.
pub fn node_menu(ctx: &BrowserContext, node: &TreeNode) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::Delete, MenuAction::Refresh];
    if !node.allowed_template_names.is_empty() {
        let folder_href = ctx.server_href(&ResourcePath::folder(node.path.as_str()));
        let links = node
            .allowed_template_names
            .iter()
            .map(|template| NewPageLink {
                template: template.clone(),
                url: new_page_url(&folder_href, template),
            })
            .collect();
        actions.push(MenuAction::Add(links));
    }
    actions
}

/// `<folder>_autoname.new?templateSelect=<template>`
pub fn new_page_url(folder_href: &str, template: &str) -> String {
    let separator = if folder_href.ends_with('/') { "" } else { "/" };
    format!("{folder_href}{separator}_autoname.new?templateSelect={template}")
}

/// How a selected file should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    #[default]
    View,
    Edit,
}

/// Preview URL for a file: its href, with `.edit` for the edit view.
pub fn file_preview_url(href: &str, mode: OpenMode) -> String {
    match mode {
        OpenMode::View => href.to_string(),
        OpenMode::Edit => format!("{href}.edit"),
    }
}

/// Acts on a row picked from the listing.
#[derive(Debug, Clone)]
pub struct EntrySelector {
    loader: FolderLoader,
}

impl EntrySelector {
    /// Creates a new selector.
    pub fn new(loader: FolderLoader) -> Self {
        Self { loader }
    }

    /// Folders are expanded in the tree and loaded (which previews
    /// templated folders); anything else is previewed.
    pub async fn select(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        entry: &FileEntry,
        mode: OpenMode,
    ) -> AppResult<()> {
        if !entry.is_collection {
            let url = file_preview_url(&entry.href, mode);
            debug!(url = %url, "Opening preview");
            view.open_preview(&url);
            return Ok(());
        }

        let path = entry.path(ctx.account_root());
        let node = ctx.registry.assign(path.as_str());
        self.loader.expand(ctx, view, node).await?;
        self.loader.load(ctx, view, &path).await?;
        Ok(())
    }
}
