//! Upload configuration.

use serde::{Deserialize, Serialize};

/// Upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// How files are sent to the server.
    #[serde(default)]
    pub mode: UploadMode,
    /// Body chunk size; one progress event is reported per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
    /// Maximum number of files sent at the same time.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            mode: UploadMode::default(),
            chunk_size_bytes: default_chunk_size(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Upload request shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Multipart POST to `<folder>_DAV/PUT?overwrite=true`.
    #[default]
    Overwrite,
    /// Multipart POST to `<folder>_DAV/PUT?_autoname=true`; the server
    /// picks a free name.
    Autoname,
    /// Streamed PUT of the raw body to `<folder><name>`.
    Raw,
}

fn default_chunk_size() -> usize {
    65_536
}

fn default_max_concurrent() -> usize {
    4
}
