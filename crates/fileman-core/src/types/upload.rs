//! Upload payloads and progress.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Target file name.
    pub name: String,
    /// MIME type sent with the part, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadFile {
    /// Create an upload from a name and contents.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Progress of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// File name.
    pub file_name: String,
    /// Bytes handed to the transport so far.
    pub sent: u64,
    /// Total bytes.
    pub total: u64,
}

impl UploadProgress {
    /// Whole percent sent; an empty file is 100%.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.sent.min(self.total) * 100) / self.total) as u8
    }
}

/// Server acknowledgement for one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedResource {
    /// Href of the stored resource.
    #[serde(default)]
    pub href: String,
    /// Stored name, which differs from the sent one in autoname mode.
    #[serde(default)]
    pub name: Option<String>,
}
