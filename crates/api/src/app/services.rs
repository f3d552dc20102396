use std::path::PathBuf;
use std::sync::Arc;

use partsfront_catalog::{Catalog, LoadError, load_catalog};
use partsfront_integrations::{
    EnquirySink, GeoLookup, IndexNowClient, IndexingClient, IntegrationError, IpApiClient, StaticFormsClient,
    http::build_client,
    memory::{LoggingEnquirySink, RecordingIndexer},
};

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("catalog load task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Everything a handler needs. Shared read-only across requests.
pub struct AppServices {
    pub content_dir: PathBuf,
    /// Public origin without a trailing slash.
    pub site_url: String,
    pub indexnow_key: Option<String>,
    pub enquiries: Arc<dyn EnquirySink>,
    pub geo: Arc<dyn GeoLookup>,
    pub indexer: Arc<dyn IndexingClient>,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Result<Self, IntegrationError> {
        let http = build_client(config.http_timeout)?;

        let enquiries: Arc<dyn EnquirySink> = match &config.forms_access_key {
            Some(key) => Arc::new(StaticFormsClient::new(
                http.clone(),
                &config.forms_endpoint,
                key,
                &config.forms_subject,
            )),
            None => Arc::new(LoggingEnquirySink::new()),
        };

        // without a key the guard refuses every indexing request
        let indexer: Arc<dyn IndexingClient> = match &config.indexnow_key {
            Some(key) => Arc::new(IndexNowClient::new(
                http.clone(),
                &config.indexnow_endpoint,
                &config.site_url,
                key,
            )),
            None => Arc::new(RecordingIndexer::new()),
        };

        let geo = Arc::new(IpApiClient::new(http, &config.geo_endpoint, &config.home_country));

        Ok(Self {
            content_dir: config.content_dir.clone(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            indexnow_key: config.indexnow_key.clone(),
            enquiries,
            geo,
            indexer,
        })
    }

    /// Read the content directory afresh. Runs on the blocking pool.
    pub async fn catalog(&self) -> Result<Catalog, CatalogError> {
        let dir = self.content_dir.clone();
        let catalog = tokio::task::spawn_blocking(move || load_catalog(&dir)).await??;
        Ok(catalog)
    }

    /// `path` must be empty (home) or start with `/`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{path}", self.site_url)
    }
}
