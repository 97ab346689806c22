//! Paginated response envelopes.
//!
//! Every list endpoint wraps its items in an object next to a `page_meta`
//! block. `next` is a server-relative path (or null on the last page).

use reqwest::Url;
use serde::Deserialize;
use shared_types::{ActivityRecord, TargetRecord};

use crate::error::ClientError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl PageMeta {
    /// Absolute URL of the next page, resolved against the URL of the
    /// current one.
    pub fn next_url(&self, current: &Url) -> Result<Option<Url>, ClientError> {
        let Some(next) = self.next.as_deref().filter(|n| !n.is_empty()) else {
            return Ok(None);
        };
        current
            .join(next)
            .map(Some)
            .map_err(|e| ClientError::InvalidUrl {
                url: next.to_string(),
                message: e.to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetSearchPage {
    #[serde(default)]
    pub page_meta: PageMeta,
    #[serde(default)]
    pub targets: Vec<TargetRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityPage {
    #[serde(default)]
    pub page_meta: PageMeta,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
}
