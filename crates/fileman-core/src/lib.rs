//! # fileman-core
//!
//! Core crate for fileman. Contains configuration schemas, the unified
//! error type, resource paths and listing types, the `DavClient` and
//! `BrowserView` traits, and formatting and validation helpers.
//!
//! This crate has **no** internal dependencies on other fileman crates.

pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
