//! Mutations on files and folders.

pub mod operations;
pub mod upload;

pub use operations::{FileOperations, RenameOutcome};
pub use upload::{UploadReport, UploadService};
