//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CONTENT_DIR: &str = "content/products";
pub const DEFAULT_SITE_URL: &str = "https://www.example.com";
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";
pub const DEFAULT_FORMS_ENDPOINT: &str = "https://api.staticforms.xyz/submit";
pub const DEFAULT_FORMS_SUBJECT: &str = "New enquiry from the website";
pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipapi.co";
pub const DEFAULT_HOME_COUNTRY: &str = "IN";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub content_dir: PathBuf,
    /// Public origin used for absolute URLs, without a trailing slash.
    pub site_url: String,
    /// IndexNow key; the indexing routes refuse every request while unset.
    pub indexnow_key: Option<String>,
    pub indexnow_endpoint: String,
    pub forms_endpoint: String,
    /// Enquiries are kept in memory while unset.
    pub forms_access_key: Option<String>,
    pub forms_subject: String,
    pub geo_endpoint: String,
    pub home_country: String,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            site_url: DEFAULT_SITE_URL.to_string(),
            indexnow_key: None,
            indexnow_endpoint: DEFAULT_INDEXNOW_ENDPOINT.to_string(),
            forms_endpoint: DEFAULT_FORMS_ENDPOINT.to_string(),
            forms_access_key: None,
            forms_subject: DEFAULT_FORMS_SUBJECT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            home_country: DEFAULT_HOME_COUNTRY.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let site_url = var("SITE_URL").unwrap_or_else(|| {
            tracing::warn!(default = DEFAULT_SITE_URL, "SITE_URL not set; absolute URLs use the placeholder origin");
            defaults.site_url.clone()
        });

        let indexnow_key = var("INDEXNOW_KEY");
        if indexnow_key.is_none() {
            tracing::warn!("INDEXNOW_KEY not set; indexing routes are disabled");
        }

        let forms_access_key = var("FORMS_ACCESS_KEY");
        if forms_access_key.is_none() {
            tracing::warn!("FORMS_ACCESS_KEY not set; enquiries will be kept in memory only");
        }

        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid HTTP_TIMEOUT_SECS; using default");
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            content_dir: var("CONTENT_DIR").map(PathBuf::from).unwrap_or(defaults.content_dir),
            site_url: site_url.trim_end_matches('/').to_string(),
            indexnow_key,
            indexnow_endpoint: var("INDEXNOW_ENDPOINT").unwrap_or(defaults.indexnow_endpoint),
            forms_endpoint: var("FORMS_ENDPOINT").unwrap_or(defaults.forms_endpoint),
            forms_access_key,
            forms_subject: var("FORMS_SUBJECT").unwrap_or(defaults.forms_subject),
            geo_endpoint: var("GEO_ENDPOINT").unwrap_or(defaults.geo_endpoint),
            home_country: var("HOME_COUNTRY")
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(defaults.home_country),
            http_timeout,
        }
    }
}
