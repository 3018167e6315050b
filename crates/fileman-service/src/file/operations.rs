//! Rename, delete, create folder and move.

use std::sync::Arc;

use tracing::info;

use fileman_core::traits::{BrowserView, DavClient, Notice};
use fileman_core::types::ResourcePath;
use fileman_core::types::path::parent_href;
use fileman_core::validation::require_name;
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;
use crate::folder::FolderLoader;

/// What a rename did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The name was empty or unchanged; no request was sent.
    Unchanged,
    /// The resource now lives at this path.
    Renamed(ResourcePath),
}

/// File and folder mutations against the DAV server.
#[derive(Debug, Clone)]
pub struct FileOperations {
    dav: Arc<dyn DavClient>,
    loader: FolderLoader,
}

impl FileOperations {
    /// Creates a new operations service.
    pub fn new(dav: Arc<dyn DavClient>, loader: FolderLoader) -> Self {
        Self { dav, loader }
    }

    /// Rename `path` in place. Empty or unchanged names are ignored.
    pub async fn rename(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        path: &ResourcePath,
        new_name: &str,
    ) -> AppResult<RenameOutcome> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == path.name() {
            return Ok(RenameOutcome::Unchanged);
        }
        let new_name = notify_err(view, require_name(new_name))?;

        let href = ctx.server_href(path);
        let destination = format!("{}/{}", parent_href(&href), new_name);
        let target = path.renamed(new_name);

        if let Err(e) = self.dav.move_resource(&href, &destination).await {
            view.notice(Notice::Error(format!(
                "Could not rename '{}': {}",
                path.name(),
                e.message
            )));
            return Err(e);
        }

        self.after_move(ctx, view, path, &target);
        info!(from = %path, to = %target, "Renamed resource");
        Ok(RenameOutcome::Renamed(target))
    }

    /// Delete `path` after the user confirms. Returns whether it was deleted.
    pub async fn delete(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        path: &ResourcePath,
    ) -> AppResult<bool> {
        if !view.confirm(&format!("Are you sure you want to delete {}?", path.name())) {
            return Ok(false);
        }

        let href = ctx.server_href(path);
        if let Err(e) = self.dav.delete(&href).await {
            view.notice(Notice::Error(format!(
                "Could not delete '{}': {}",
                path.name(),
                e.message
            )));
            return Err(e);
        }

        view.remove_row(path);
        info!(path = %path, "Deleted resource");
        Ok(true)
    }

    /// Create folder `name` in the current folder and refresh the listing.
    pub async fn create_folder(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        name: &str,
    ) -> AppResult<ResourcePath> {
        let name = notify_err(view, require_name(name))?;
        let parent = ctx.current_folder().clone();
        let href = ctx.server_href(&parent);

        if let Err(e) = self.dav.make_collection(&href, name).await {
            view.notice(Notice::Error(format!(
                "Could not create folder '{name}': {}",
                e.message
            )));
            return Err(e);
        }

        let created = parent.child_folder(name);
        info!(folder = %created, "Created folder");
        self.loader.refresh(ctx, view).await?;
        Ok(created)
    }

    /// Move `source` to `destination`, the full new path. The destination
    /// may carry a different final name, which moves and renames in one go.
    /// Moving a resource onto itself sends nothing.
    pub async fn move_to(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        source: &ResourcePath,
        destination: &ResourcePath,
    ) -> AppResult<ResourcePath> {
        if source.is_root() || destination.is_root() {
            return notify_err(view, Err(AppError::validation("The top folder cannot be moved")));
        }
        notify_err(view, require_name(destination.name()))?;
        let target = if source.is_folder() {
            ResourcePath::folder(destination.as_str())
        } else {
            ResourcePath::new(destination.as_str().trim_end_matches('/'))
        };
        if target == *source {
            return Ok(target);
        }
        if source.is_folder() && target.is_within(source) {
            return notify_err(
                view,
                Err(AppError::validation(format!(
                    "Cannot move '{source}' into itself"
                ))),
            );
        }

        let href = ctx.server_href(source);
        let destination = ctx.server_href(&target);
        let destination = destination.trim_end_matches('/');
        if let Err(e) = self.dav.move_resource(&href, destination).await {
            view.notice(Notice::Error(format!(
                "Could not move '{}': {}",
                source.name(),
                e.message
            )));
            return Err(e);
        }

        self.after_move(ctx, view, source, &target);
        info!(from = %source, to = %target, "Moved resource");
        Ok(target)
    }

    /// Move `source` into `folder`, keeping its name.
    pub async fn move_into(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        source: &ResourcePath,
        folder: &ResourcePath,
    ) -> AppResult<ResourcePath> {
        let folder = ResourcePath::folder(folder.as_str());
        let destination = if source.is_folder() {
            folder.child_folder(source.name())
        } else {
            folder.child_file(source.name())
        };
        self.move_to(ctx, view, source, &destination).await
    }

    fn after_move(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        from: &ResourcePath,
        to: &ResourcePath,
    ) {
        ctx.registry.repoint(from, to);
        if from.is_folder() && ctx.current_folder().is_within(from) {
            let suffix = &ctx.current_folder().as_str()[from.as_str().len()..];
            let moved = ResourcePath::folder(format!("{to}{suffix}"));
            let template = ctx.current_template().map(str::to_string);
            ctx.set_current_folder(moved, template);
        }
        view.rename_row(from, to);
    }
}

/// Show a validation failure as an error notice before returning it.
fn notify_err<T>(view: &mut dyn BrowserView, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = &result {
        view.notice(Notice::Error(e.message.clone()));
    }
    result
}
