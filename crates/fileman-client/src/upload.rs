//! Uploads with per-chunk progress.
//!
//! The body is split into `upload.chunk_size_bytes` chunks and handed to
//! `reqwest` as a stream, so progress is reported as the transport pulls
//! each chunk rather than once at the end.

use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use fileman_core::config::UploadMode;
use fileman_core::traits::ProgressCallback;
use fileman_core::types::path::file_name;
use fileman_core::types::{UploadFile, UploadProgress, UploadedResource};
use fileman_core::{AppError, AppResult, ErrorKind};

use crate::client::DavHttpClient;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "files[]";

impl DavHttpClient {
    /// Upload `file` into `folder_href` using `mode`.
    pub async fn upload_file(
        &self,
        folder_href: &str,
        file: UploadFile,
        mode: UploadMode,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource> {
        let name = file.name.clone();
        let total = file.len();
        let result = match mode {
            UploadMode::Overwrite | UploadMode::Autoname => {
                self.upload_multipart(folder_href, file, mode, progress).await
            }
            UploadMode::Raw => self.upload_raw(folder_href, file, progress).await,
        };
        if let Ok(resource) = &result {
            info!(file = %name, bytes = total, href = %resource.href, "Uploaded file");
        }
        result
    }

    async fn upload_multipart(
        &self,
        folder_href: &str,
        file: UploadFile,
        mode: UploadMode,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource> {
        let query = match mode {
            UploadMode::Autoname => ("_autoname", "true"),
            _ => ("overwrite", "true"),
        };
        let url = self.endpoint(folder_href, "PUT")?;
        debug!(url = %url, file = %file.name, mode = ?mode, "Multipart upload");

        let total = file.len();
        let mut part = Part::stream_with_length(self.progress_body(&file, progress), total)
            .file_name(file.name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid content type '{content_type}'"),
                    e,
                )
            })?;
        }
        let mut form = Form::new();
        if mode == UploadMode::Overwrite {
            form = form.text("overwrite", "true");
        }
        let form = form.part(FILE_FIELD, part);

        let request = self.http.post(url).query(&[query]).multipart(form);
        let stored: Vec<UploadedResource> = self.send_json(request).await?;
        let mut resource = stored.into_iter().next().unwrap_or_default();
        if resource.href.is_empty() {
            resource.href = format!("{}{}", with_slash(folder_href), file.name);
        }
        if resource.name.is_none() {
            resource.name = Some(file_name(&resource.href).to_string());
        }
        Ok(resource)
    }

    async fn upload_raw(
        &self,
        folder_href: &str,
        file: UploadFile,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource> {
        let href = format!("{}{}", with_slash(folder_href), file.name);
        let url = self.url(&href)?;
        debug!(url = %url, file = %file.name, "Raw upload");

        let mut request = self
            .http
            .put(url)
            .header("X-Filename", file.name.as_str())
            .header(reqwest::header::CONTENT_LENGTH, file.len())
            .body(self.progress_body(&file, progress));
        if let Some(content_type) = &file.content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type.as_str());
        }
        self.send(request).await?;
        Ok(UploadedResource {
            href,
            name: Some(file.name),
        })
    }

    /// A streaming body that reports progress as each chunk is pulled.
    fn progress_body(&self, file: &UploadFile, progress: ProgressCallback) -> Body {
        let total = file.len();
        let file_name = file.name.clone();
        progress(UploadProgress {
            file_name: file_name.clone(),
            sent: 0,
            total,
        });

        let mut sent = 0u64;
        let chunks = split_chunks(&file.data, self.upload.chunk_size_bytes);
        let stream = stream::iter(chunks).map(move |chunk| {
            sent += chunk.len() as u64;
            progress(UploadProgress {
                file_name: file_name.clone(),
                sent,
                total,
            });
            Ok::<Bytes, std::io::Error>(chunk)
        });
        Body::wrap_stream(stream)
    }
}

fn with_slash(href: &str) -> String {
    if href.ends_with('/') {
        href.to_string()
    } else {
        format!("{href}/")
    }
}

/// Zero-copy slices of at most `chunk_size` bytes.
pub fn split_chunks(data: &Bytes, chunk_size: usize) -> Vec<Bytes> {
    let chunk_size = chunk_size.max(1);
    (0..data.len())
        .step_by(chunk_size)
        .map(|start| data.slice(start..(start + chunk_size).min(data.len())))
        .collect()
}
