//! Mutating DAV requests: move, make collection, delete.

use tracing::debug;

use fileman_core::AppResult;

use crate::client::DavHttpClient;

impl DavHttpClient {
    /// `POST <href>/_DAV/MOVE` with `destination=<destination>`.
    pub async fn move_to(&self, href: &str, destination: &str) -> AppResult<()> {
        let url = self.endpoint(href, "MOVE")?;
        debug!(url = %url, destination, "MOVE");
        let request = self.http.post(url).form(&[("destination", destination)]);
        self.send_mutation(request).await
    }

    /// `POST <folder>_DAV/MKCOL` with `name=<name>`.
    pub async fn mkcol(&self, folder_href: &str, name: &str) -> AppResult<()> {
        let url = self.endpoint(folder_href, "MKCOL")?;
        debug!(url = %url, name, "MKCOL");
        let request = self.http.post(url).form(&[("name", name)]);
        self.send_mutation(request).await
    }

    /// `DELETE <href>`.
    pub async fn remove(&self, href: &str) -> AppResult<()> {
        let url = self.url(href)?;
        debug!(url = %url, "DELETE");
        self.send_mutation(self.http.delete(url)).await
    }
}
