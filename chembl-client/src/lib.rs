//! # chembl-client
//!
//! HTTP client for the ChEMBL web services.
//!
//! Covers the two calls the export pipeline needs:
//! - target search (free text → ranked target records)
//! - activity query (target id + standard type → every matching activity,
//!   following `page_meta.next` across pages)

pub mod activity;
pub mod page;
pub mod target;

mod error;
mod http;

pub use error::ClientError;

use async_trait::async_trait;
use reqwest::Url;
use shared_types::{ActivityRecord, StandardType, TargetRecord};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";
/// Largest `limit` the activity endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 1000;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = concat!("chembl-export/", env!("CARGO_PKG_VERSION"));

/// A catalog of targets and their bioactivity measurements.
#[async_trait]
pub trait BioactivitySource: Send + Sync {
    /// Targets matching `query`, in the catalog's ranking order.
    async fn search_targets(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<TargetRecord>, ClientError>;

    /// Every activity recorded against `target_chembl_id` whose standard
    /// type equals `standard_type`, in source order.
    async fn fetch_activities(
        &self,
        target_chembl_id: &str,
        standard_type: &StandardType,
    ) -> Result<Vec<ActivityRecord>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub page_size: usize,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: MAX_PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client for the ChEMBL REST API.
pub struct ChemblClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: usize,
}

impl ChemblClient {
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()?;

        let base_url = parse_base_url(&options.base_url)?;

        Ok(Self {
            http,
            base_url,
            page_size: options.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientOptions::default())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `{base}/{resource}.json` or `{base}/{resource}/{action}.json`
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(&format!("{path}.json"))
            .map_err(|e| ClientError::InvalidUrl {
                url: path.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl BioactivitySource for ChemblClient {
    async fn search_targets(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<TargetRecord>, ClientError> {
        self.search_target(query, limit).await
    }

    async fn fetch_activities(
        &self,
        target_chembl_id: &str,
        standard_type: &StandardType,
    ) -> Result<Vec<ActivityRecord>, ClientError> {
        self.filter_activities(target_chembl_id, standard_type).await
    }
}

// Joining relative paths onto the base keeps its last segment only when the
// base ends with a slash.
fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl {
        url: base_url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_with_defaults() {
        let client = ChemblClient::with_defaults().unwrap();
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);
        assert_eq!(
            client.base_url().as_str(),
            "https://www.ebi.ac.uk/chembl/api/data/"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = ChemblClient::new(ClientOptions {
            base_url: "http://localhost:8000/chembl/api/data/".to_string(),
            ..ClientOptions::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint("target/search").unwrap().as_str(),
            "http://localhost:8000/chembl/api/data/target/search.json"
        );
        assert_eq!(
            client.endpoint("activity").unwrap().as_str(),
            "http://localhost:8000/chembl/api/data/activity.json"
        );
    }

    #[test]
    fn page_size_is_clamped() {
        let client = ChemblClient::new(ClientOptions {
            page_size: 50_000,
            ..ClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.page_size(), MAX_PAGE_SIZE);

        let client = ChemblClient::new(ClientOptions {
            page_size: 0,
            ..ClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.page_size(), 1);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ChemblClient::new(ClientOptions {
            base_url: "not a url".to_string(),
            ..ClientOptions::default()
        });
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_herg_ki_activities() {
        let client = ChemblClient::with_defaults().unwrap();
        let targets = client.search_targets("herg", 5).await.unwrap();
        println!("\n── search(\"herg\") ── {} results", targets.len());
        for t in &targets {
            println!("  {} | {}", t.target_chembl_id, t.display_name());
        }

        let first = targets.first().expect("herg should resolve");
        let activities = client
            .fetch_activities(&first.target_chembl_id, &StandardType::default())
            .await
            .unwrap();
        println!("── {} Ki activities", activities.len());
        assert!(activities
            .iter()
            .all(|a| a.get("standard_type") == Some(&serde_json::Value::from("Ki"))));
    }
}
