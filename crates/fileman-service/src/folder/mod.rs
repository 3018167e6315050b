//! Folder listing and deep-link opening.

pub mod loader;
pub mod opener;

pub use loader::{FolderLoader, Listing};
pub use opener::{InitialPathOpener, OpenOutcome, OpenerState};
