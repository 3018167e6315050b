//! Core type definitions used across the fileman workspace.

pub mod entry;
pub mod form;
pub mod id;
pub mod node;
pub mod path;
pub mod quota;
pub mod session;
pub mod upload;

pub use entry::{FileEntry, FileType, is_plain_template};
pub use form::{FieldMessage, FormResponse, PropPatchFailure};
pub use id::NodeId;
pub use node::TreeNode;
pub use path::ResourcePath;
pub use quota::Quota;
pub use session::{LoginRedirect, LoginResponse, SessionUser};
pub use upload::{UploadFile, UploadProgress, UploadedResource};
