//! IndexNow push notifications for changed URLs.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::IntegrationError;

/// What the indexing endpoint said about a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexingOutcome {
    pub success: bool,
    pub submitted: usize,
    pub status: u16,
    pub status_text: String,
}

impl IndexingOutcome {
    /// IndexNow answers 200 or 202 for accepted submissions.
    pub fn from_status(status: u16, status_text: impl Into<String>, submitted: usize) -> Self {
        Self {
            success: status == 200 || status == 202,
            submitted,
            status,
            status_text: status_text.into(),
        }
    }
}

#[async_trait]
pub trait IndexingClient: Send + Sync {
    async fn submit(&self, urls: &[String]) -> Result<IndexingOutcome, IntegrationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: String,
    url_list: &'a [String],
}

/// Client for an IndexNow endpoint.
#[derive(Debug, Clone)]
pub struct IndexNowClient {
    http: reqwest::Client,
    endpoint: String,
    site_url: String,
    key: String,
}

impl IndexNowClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        site_url: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            site_url: site_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    fn host(&self) -> &str {
        self.site_url
            .split_once("://")
            .map_or(self.site_url.as_str(), |(_, rest)| rest)
            .split('/')
            .next()
            .unwrap_or_default()
    }

    fn payload<'a>(&'a self, urls: &'a [String]) -> IndexNowPayload<'a> {
        IndexNowPayload {
            host: self.host(),
            key: &self.key,
            key_location: format!("{}/{}.txt", self.site_url, self.key),
            url_list: urls,
        }
    }
}

#[async_trait]
impl IndexingClient for IndexNowClient {
    async fn submit(&self, urls: &[String]) -> Result<IndexingOutcome, IntegrationError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.payload(urls))
            .send()
            .await?;

        let status = response.status();
        let outcome = IndexingOutcome::from_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            urls.len(),
        );
        if outcome.success {
            tracing::info!(submitted = outcome.submitted, status = outcome.status, "indexnow submission accepted");
        } else {
            tracing::warn!(submitted = outcome.submitted, status = outcome.status, "indexnow submission rejected");
        }
        Ok(outcome)
    }
}
