//! [`DavClient`] implementation for [`DavHttpClient`].

use async_trait::async_trait;

use fileman_core::AppResult;
use fileman_core::config::UploadMode;
use fileman_core::traits::{DavClient, ProgressCallback};
use fileman_core::types::{
    FileEntry, FormResponse, LoginResponse, PropPatchFailure, Quota, UploadFile, UploadedResource,
};

use crate::client::DavHttpClient;

#[async_trait]
impl DavClient for DavHttpClient {
    async fn list(&self, folder_href: &str) -> AppResult<Vec<FileEntry>> {
        self.list_folder(folder_href).await
    }

    async fn quota(&self, href: &str) -> AppResult<Quota> {
        self.fetch_quota(href).await
    }

    async fn move_resource(&self, href: &str, destination: &str) -> AppResult<()> {
        self.move_to(href, destination).await
    }

    async fn make_collection(&self, folder_href: &str, name: &str) -> AppResult<()> {
        self.mkcol(folder_href, name).await
    }

    async fn delete(&self, href: &str) -> AppResult<()> {
        self.remove(href).await
    }

    async fn upload(
        &self,
        folder_href: &str,
        file: UploadFile,
        mode: UploadMode,
        progress: ProgressCallback,
    ) -> AppResult<UploadedResource> {
        self.upload_file(folder_href, file, mode, progress).await
    }

    async fn login(&self, user_name: &str, password: &str) -> AppResult<LoginResponse> {
        self.post_login(user_name, password).await
    }

    async fn logout(&self) -> AppResult<()> {
        self.post_logout().await
    }

    fn session_cookie(&self) -> Option<String> {
        self.cookie_value()
    }

    async fn submit_form(&self, url: &str, fields: &[(String, String)]) -> AppResult<FormResponse> {
        self.post_form(url, fields).await
    }

    async fn prop_patch(
        &self,
        href: &str,
        properties: &[(String, String)],
    ) -> AppResult<Vec<PropPatchFailure>> {
        self.proppatch(href, properties).await
    }
}
