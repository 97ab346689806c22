//! Activity queries with pagination.

use reqwest::Url;
use shared_types::{ActivityRecord, StandardType};
use std::collections::HashSet;
use std::future::Future;

use crate::{error::ClientError, http::decode_json, page::ActivityPage, ChemblClient};

impl ChemblClient {
    /// Fetch every activity for `target_chembl_id` with the given standard
    /// type. Filtering happens server side; pages are concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if any page request fails, returns a
    /// non-success status, or cannot be parsed.
    pub async fn filter_activities(
        &self,
        target_chembl_id: &str,
        standard_type: &StandardType,
    ) -> Result<Vec<ActivityRecord>, ClientError> {
        let first = self.activity_query_url(target_chembl_id, standard_type)?;
        collect_pages(first, |url| self.fetch_activity_page(url)).await
    }

    /// URL of the first activity page for a target and standard type.
    pub fn activity_query_url(
        &self,
        target_chembl_id: &str,
        standard_type: &StandardType,
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint("activity")?;
        url.query_pairs_mut()
            .append_pair("target_chembl_id", target_chembl_id)
            .append_pair("standard_type", standard_type.as_str())
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", "0");
        Ok(url)
    }

    async fn fetch_activity_page(&self, url: Url) -> Result<ActivityPage, ClientError> {
        let resp = self.http.get(url).send().await?;
        decode_json(resp).await
    }
}

/// Walk `page_meta.next` links from `first`, accumulating activities.
///
/// Stops at the first page without a next link, or when a link repeats.
pub(crate) async fn collect_pages<F, Fut>(
    first: Url,
    mut fetch: F,
) -> Result<Vec<ActivityRecord>, ClientError>
where
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<ActivityPage, ClientError>>,
{
    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(first);

    while let Some(url) = next.take() {
        if !visited.insert(url.to_string()) {
            tracing::warn!(%url, "pagination link repeats, stopping");
            break;
        }

        let page = fetch(url.clone()).await?;
        tracing::debug!(
            %url,
            fetched = page.activities.len(),
            total = ?page.page_meta.total_count,
            "activity page"
        );

        next = page.page_meta.next_url(&url)?;
        records.extend(page.activities);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageMeta;
    use std::collections::HashMap;

    fn activity(id: i64) -> ActivityRecord {
        serde_json::from_value(serde_json::json!({
            "activity_id": id,
            "standard_type": "Ki",
        }))
        .unwrap()
    }

    fn page(ids: &[i64], next: Option<&str>) -> ActivityPage {
        ActivityPage {
            page_meta: PageMeta {
                next: next.map(str::to_string),
                ..PageMeta::default()
            },
            activities: ids.iter().copied().map(activity).collect(),
        }
    }

    fn ids(records: &[ActivityRecord]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get("activity_id").and_then(|v| v.as_i64()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn collects_pages_in_order() {
        let base = "https://chembl.test/chembl/api/data/activity.json";
        let mut pages = HashMap::new();
        pages.insert(
            format!("{base}?offset=0"),
            page(&[1, 2], Some("/chembl/api/data/activity.json?offset=2")),
        );
        pages.insert(
            format!("{base}?offset=2"),
            page(&[3, 4], Some("/chembl/api/data/activity.json?offset=4")),
        );
        pages.insert(format!("{base}?offset=4"), page(&[5], None));

        let first = Url::parse(&format!("{base}?offset=0")).unwrap();
        let mut requested = Vec::new();
        let records = collect_pages(first, |url| {
            requested.push(url.to_string());
            let result = pages
                .remove(url.as_str())
                .ok_or_else(|| ClientError::Api {
                    status: 404,
                    message: url.to_string(),
                });
            async move { result }
        })
        .await
        .unwrap();

        assert_eq!(ids(&records), vec![1, 2, 3, 4, 5]);
        assert_eq!(requested.len(), 3);
    }

    #[tokio::test]
    async fn stops_on_repeated_link() {
        let first = Url::parse("https://chembl.test/chembl/api/data/activity.json?offset=0").unwrap();
        let mut calls = 0;
        let records = collect_pages(first, |_url| {
            calls += 1;
            async { Ok(page(&[7], Some("/chembl/api/data/activity.json?offset=0"))) }
        })
        .await
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(ids(&records), vec![7]);
    }

    #[tokio::test]
    async fn page_error_aborts_collection() {
        let first = Url::parse("https://chembl.test/chembl/api/data/activity.json?offset=0").unwrap();
        let result = collect_pages(first, |_url| async {
            Err(ClientError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(ClientError::Api { status: 500, .. })));
    }

    #[test]
    fn first_page_url_carries_filters() {
        let client = ChemblClient::new(crate::ClientOptions {
            page_size: 250,
            ..crate::ClientOptions::default()
        })
        .unwrap();
        let url = client
            .activity_query_url("CHEMBL240", &StandardType::default())
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.ebi.ac.uk/chembl/api/data/activity.json?target_chembl_id=CHEMBL240&standard_type=Ki&limit=250&offset=0"
        );
    }
}
