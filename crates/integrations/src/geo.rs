//! Visitor geolocation, used to decide whether to show export messaging.

use std::net::IpAddr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;

/// Where a visitor appears to be.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub country_code: Option<String>,
    /// `None` when the country is unknown.
    pub is_international: Option<bool>,
}

impl GeoInfo {
    /// Nothing known; the safe fallback when lookups fail.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn new(country: Option<String>, country_code: Option<String>, home_country: &str) -> Self {
        let country_code = country_code.map(|c| c.trim().to_ascii_uppercase()).filter(|c| !c.is_empty());
        let is_international = country_code
            .as_deref()
            .map(|code| !code.eq_ignore_ascii_case(home_country));
        Self {
            country,
            country_code,
            is_international,
        }
    }
}

#[async_trait]
pub trait GeoLookup: Send + Sync {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoInfo, IntegrationError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    country_name: Option<String>,
    country_code: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// ipapi.co-style lookup (`{endpoint}/{ip}/json/`).
#[derive(Debug, Clone)]
pub struct IpApiClient {
    http: reqwest::Client,
    endpoint: String,
    home_country: String,
}

impl IpApiClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, home_country: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            home_country: home_country.into(),
        }
    }

    fn url(&self, ip: IpAddr) -> String {
        format!("{}/{ip}/json/", self.endpoint.trim_end_matches('/'))
    }

    fn interpret(&self, body: IpApiResponse) -> Result<GeoInfo, IntegrationError> {
        if body.error {
            return Err(IntegrationError::invalid_response(
                body.reason.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }
        Ok(GeoInfo::new(body.country_name, body.country_code, &self.home_country))
    }
}

#[async_trait]
impl GeoLookup for IpApiClient {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoInfo, IntegrationError> {
        let response = self.http.get(self.url(ip)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IntegrationError::upstream(status.as_u16(), "geolocation lookup failed"));
        }
        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| IntegrationError::invalid_response(e.to_string()))?;
        self.interpret(body)
    }
}
