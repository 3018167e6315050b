//! Seams between the services and the outside world.

pub mod dav;
pub mod view;

pub use dav::{DavClient, ProgressCallback};
pub use view::{BrowserView, Notice};
