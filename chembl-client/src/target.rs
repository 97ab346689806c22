//! Target search.

use reqwest::Url;
use shared_types::TargetRecord;

use crate::{error::ClientError, http::decode_json, page::TargetSearchPage, ChemblClient};

impl ChemblClient {
    /// Search the target catalog for `query`.
    ///
    /// Only the first page is requested; `limit` caps its size. Results keep
    /// the service's relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails, the service
    /// returns a non-success status, or the response cannot be parsed.
    pub async fn search_target(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<TargetRecord>, ClientError> {
        let url = self.search_url(query, limit)?;

        tracing::debug!(%url, "searching targets");
        let resp = self.http.get(url).send().await?;

        let page: TargetSearchPage = decode_json(resp).await?;
        tracing::debug!(
            hits = page.targets.len(),
            total = ?page.page_meta.total_count,
            "target search returned"
        );
        Ok(page.targets)
    }

    /// `{base}/target/search.json?q=<query>&limit=<n>`, with `limit` clamped
    /// to `1..=MAX_PAGE_SIZE`.
    pub fn search_url(&self, query: &str, limit: usize) -> Result<Url, ClientError> {
        let limit = limit.clamp(1, crate::MAX_PAGE_SIZE);
        let mut url = self.endpoint("target/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}
