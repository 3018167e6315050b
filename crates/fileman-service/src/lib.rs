//! # fileman-service
//!
//! Keeps the folder tree, the file listing and the server in step. Every
//! service receives its [`DavClient`](fileman_core::traits::DavClient) at
//! construction and takes the [`BrowserContext`] and a
//! [`BrowserView`](fileman_core::traits::BrowserView) per call.

pub mod account;
pub mod context;
pub mod file;
pub mod filter;
pub mod folder;
pub mod forms;
pub mod menu;
pub mod registry;
pub mod session;

#[cfg(test)]
mod testing;

pub use account::{AccountService, QuotaSummary};
pub use context::BrowserContext;
pub use file::{FileOperations, RenameOutcome, UploadReport, UploadService};
pub use filter::ListingFilter;
pub use folder::{FolderLoader, InitialPathOpener, Listing, OpenOutcome, OpenerState};
pub use forms::{FieldRule, FormRules, FormService};
pub use menu::{EntrySelector, MenuAction, NewPageLink, OpenMode};
pub use registry::NodeIdRegistry;
pub use session::SessionService;
