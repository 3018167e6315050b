//! Browser state shared by the services.

use fileman_core::config::AccountConfig;
use fileman_core::types::{ResourcePath, SessionUser};

use crate::filter::ListingFilter;
use crate::registry::NodeIdRegistry;

/// What the user is looking at.
///
/// Owns the node registry, the current folder and template, the signed-in
/// user and the listing filter. Services take it by `&mut`, which keeps a
/// single writer for all view state.
#[derive(Debug, Clone)]
pub struct BrowserContext {
    /// Node id ↔ path table.
    pub registry: NodeIdRegistry,
    /// Listing filter built from the account settings.
    pub filter: ListingFilter,
    account_root: String,
    current_folder: ResourcePath,
    current_template: Option<String>,
    user: Option<SessionUser>,
}

impl BrowserContext {
    /// A fresh context at the account root.
    pub fn new(account: &AccountConfig) -> Self {
        Self {
            registry: NodeIdRegistry::new(account.root.clone()),
            filter: ListingFilter::new(account),
            account_root: account.root.clone(),
            current_folder: ResourcePath::root(),
            current_template: None,
            user: None,
        }
    }

    /// Account root prefix.
    pub fn account_root(&self) -> &str {
        &self.account_root
    }

    /// Absolute server href for a path.
    pub fn server_href(&self, path: &ResourcePath) -> String {
        path.to_server_path(&self.account_root)
    }

    /// Normalize any href to a path relative to the account root.
    pub fn path_of(&self, href: &str) -> ResourcePath {
        ResourcePath::from_href(href, &self.account_root)
    }

    /// Folder currently listed.
    pub fn current_folder(&self) -> &ResourcePath {
        &self.current_folder
    }

    /// Template of the folder currently listed.
    pub fn current_template(&self) -> Option<&str> {
        self.current_template.as_deref()
    }

    /// Record a newly listed folder.
    pub fn set_current_folder(&mut self, folder: ResourcePath, template: Option<String>) {
        self.current_folder = folder;
        self.current_template = template;
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Replace the signed-in user.
    pub fn set_user(&mut self, user: Option<SessionUser>) {
        self.user = user;
    }
}
