//! Concurrent uploads into the current folder.

use std::pin::pin;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{Semaphore, mpsc};
use tracing::{info, warn};

use fileman_core::config::UploadConfig;
use fileman_core::traits::{BrowserView, DavClient, Notice, ProgressCallback};
use fileman_core::types::{UploadFile, UploadProgress, UploadedResource};
use fileman_core::{AppError, AppResult};

use crate::context::BrowserContext;
use crate::folder::FolderLoader;

/// Per-file results of one upload batch.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Files the server accepted, in submission order.
    pub uploaded: Vec<UploadedResource>,
    /// Files that failed, with the reason.
    pub failed: Vec<(String, AppError)>,
}

impl UploadReport {
    /// Whether every file went through.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends files to the current folder.
#[derive(Debug, Clone)]
pub struct UploadService {
    dav: Arc<dyn DavClient>,
    loader: FolderLoader,
    config: UploadConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(dav: Arc<dyn DavClient>, loader: FolderLoader, config: UploadConfig) -> Self {
        Self {
            dav,
            loader,
            config,
        }
    }

    /// Upload `files` concurrently into the current folder.
    ///
    /// Progress is forwarded to the view as chunks go out. A failed file is
    /// reported and does not stop the others. Once all have finished the
    /// listing is refreshed if anything was stored.
    pub async fn upload(
        &self,
        ctx: &mut BrowserContext,
        view: &mut dyn BrowserView,
        files: Vec<UploadFile>,
    ) -> AppResult<UploadReport> {
        if files.is_empty() {
            return Err(AppError::validation("No files to upload"));
        }

        let folder_href = ctx.server_href(ctx.current_folder());
        let limit = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let (tx, mut rx) = mpsc::unbounded_channel::<UploadProgress>();
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();

        let uploads: Vec<_> = files
            .into_iter()
            .map(|file| {
                let tx = tx.clone();
                let progress: ProgressCallback = Arc::new(move |p: UploadProgress| {
                    let _ = tx.send(p);
                });
                let limit = Arc::clone(&limit);
                let dav = Arc::clone(&self.dav);
                let folder_href = folder_href.clone();
                let mode = self.config.mode;
                async move {
                    let _permit = limit
                        .acquire_owned()
                        .await
                        .map_err(|_| AppError::internal("Upload limiter closed"))?;
                    dav.upload(&folder_href, file, mode, progress).await
                }
            })
            .collect();
        drop(tx);

        let mut all = pin!(join_all(uploads));
        let results = loop {
            tokio::select! {
                results = &mut all => break results,
                Some(progress) = rx.recv() => view.upload_progress(&progress),
            }
        };
        while let Ok(progress) = rx.try_recv() {
            view.upload_progress(&progress);
        }

        let mut report = UploadReport::default();
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(resource) => report.uploaded.push(resource),
                Err(e) => {
                    warn!(file = %name, error = %e, "Upload failed");
                    view.notice(Notice::Error(format!(
                        "Could not upload '{name}': {}",
                        e.message
                    )));
                    report.failed.push((name, e));
                }
            }
        }

        info!(
            folder = %folder_href,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Upload batch finished"
        );

        if !report.uploaded.is_empty() {
            if let Err(e) = self.loader.refresh(ctx, view).await {
                warn!(error = %e, "Listing refresh after upload failed");
            }
        }
        Ok(report)
    }
}
