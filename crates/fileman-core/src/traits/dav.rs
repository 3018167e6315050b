//! Remote DAV server trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::UploadMode;
use crate::result::AppResult;
use crate::types::{
    FileEntry, FormResponse, LoginResponse, PropPatchFailure, Quota, UploadFile, UploadProgress,
    UploadedResource,
};

/// Receives upload progress as chunks are handed to the transport.
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Fields requested by every folder listing, with `source>alias` renames.
pub const LISTING_FIELDS: &[&str] = &[
    "name",
    "clyde:allowedTemplateNames",
    "clyde:streamingVideoHref",
    "getcontenttype>contentType",
    "clyde:thumbHref",
    "href",
    "iscollection",
    "getlastmodified>modifiedDate",
    "getcontentlength>contentLength",
    "clyde:templateName",
];

/// Fields requested by the quota lookup.
pub const QUOTA_FIELDS: &[&str] = &["quota-available-bytes>available", "quota-used-bytes>used"];

/// Access to a JSON-speaking DAV server.
///
/// Every href is an absolute server path that already includes the account
/// root; callers build them from [`crate::types::ResourcePath`]. Failures map
/// to `Transport` when no response arrived and `HttpStatus` for non-2xx
/// answers. Move, make-collection and delete also fail with `Rejected` when a
/// 2xx body reports `"status": false`; form and login payloads are returned
/// as-is for the caller to judge.
#[async_trait]
pub trait DavClient: Send + Sync + std::fmt::Debug + 'static {
    /// Depth-1 PROPFIND. Element 0 is the folder itself.
    async fn list(&self, folder_href: &str) -> AppResult<Vec<FileEntry>>;

    /// Depth-0 PROPFIND for quota figures.
    async fn quota(&self, href: &str) -> AppResult<Quota>;

    /// Move or rename `href` to `destination`.
    async fn move_resource(&self, href: &str, destination: &str) -> AppResult<()>;

    /// Create collection `name` inside `folder_href`.
    async fn make_collection(&self, folder_href: &str, name: &str) -> AppResult<()>;

    /// Delete the resource at `href`.
    async fn delete(&self, href: &str) -> AppResult<()>;

    /// Upload one file into `folder_href`.
    async fn upload(
        &self,
        folder_href: &str,
        file: UploadFile,
        mode: UploadMode,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource>;

    /// Submit credentials to the login endpoint.
    async fn login(&self, user_name: &str, password: &str) -> AppResult<LoginResponse>;

    /// End the session.
    async fn logout(&self) -> AppResult<()>;

    /// Current raw value of the session cookie, if any.
    fn session_cookie(&self) -> Option<String>;

    /// POST url-encoded fields to a form endpoint.
    async fn submit_form(&self, url: &str, fields: &[(String, String)]) -> AppResult<FormResponse>;

    /// Set properties on `href`; returns one entry per property that failed.
    async fn prop_patch(
        &self,
        href: &str,
        properties: &[(String, String)],
    ) -> AppResult<Vec<PropPatchFailure>>;
}
