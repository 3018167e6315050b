//! JSON PROPFIND: folder listings and quota.

use serde::de::DeserializeOwned;
use tracing::debug;

use fileman_core::traits::dav::{LISTING_FIELDS, QUOTA_FIELDS};
use fileman_core::types::{FileEntry, Quota};
use fileman_core::{AppError, AppResult};

use crate::client::DavHttpClient;

impl DavHttpClient {
    /// `GET <href>_DAV/PROPFIND?fields=...&depth=<depth>`, decoded as `T`.
    pub async fn propfind<T: DeserializeOwned>(
        &self,
        href: &str,
        fields: &[&str],
        depth: u8,
    ) -> AppResult<T> {
        let url = self.endpoint(href, "PROPFIND")?;
        debug!(url = %url, depth, "PROPFIND");
        let request = self
            .http
            .get(url)
            .query(&[("fields", fields.join(",")), ("depth", depth.to_string())]);
        self.send_json(request).await
    }

    /// Depth-1 listing of a folder, folder row first.
    pub async fn list_folder(&self, folder_href: &str) -> AppResult<Vec<FileEntry>> {
        self.propfind(folder_href, LISTING_FIELDS, 1).await
    }

    /// Quota figures of the resource at `href`.
    pub async fn fetch_quota(&self, href: &str) -> AppResult<Quota> {
        let rows: Vec<Quota> = self.propfind(href, QUOTA_FIELDS, 0).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(format!("No quota information for '{href}'")))
    }
}
