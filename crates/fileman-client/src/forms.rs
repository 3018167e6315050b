//! Form posts and PROPPATCH.

use tracing::debug;

use fileman_core::AppResult;
use fileman_core::types::{FormResponse, PropPatchFailure};

use crate::client::DavHttpClient;

impl DavHttpClient {
    /// POST url-encoded fields to `url` and decode the status payload.
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> AppResult<FormResponse> {
        let url = self.url(url)?;
        debug!(url = %url, fields = fields.len(), "Posting form");
        self.send_json(self.http.post(url).form(fields)).await
    }

    /// `POST <href>_DAV/PROPPATCH` with one field per property.
    pub async fn proppatch(
        &self,
        href: &str,
        properties: &[(String, String)],
    ) -> AppResult<Vec<PropPatchFailure>> {
        let url = self.endpoint(href, "PROPPATCH")?;
        debug!(url = %url, "PROPPATCH");
        self.send_json(self.http.post(url).form(properties)).await
    }
}
