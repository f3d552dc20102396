//! Shared outbound HTTP client.

use std::time::Duration;

use crate::error::IntegrationError;

const USER_AGENT: &str = concat!("partsfront/", env!("CARGO_PKG_VERSION"));

/// Build the client every upstream adapter shares.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, IntegrationError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}
