//! In-process stand-ins for the external collaborators.
//!
//! [`LoggingEnquirySink`] stands in for the forms relay when it is not
//! configured; the rest are fakes for the API tests.

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::enquiry::{Enquiry, EnquiryReceipt, EnquirySink};
use crate::error::IntegrationError;
use crate::geo::{GeoInfo, GeoLookup};
use crate::indexnow::{IndexingClient, IndexingOutcome};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Logs enquiries instead of relaying them. Keeps nothing.
#[derive(Debug, Default)]
pub struct LoggingEnquirySink {
    accepted: AtomicUsize,
}

impl LoggingEnquirySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enquiries seen since startup.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EnquirySink for LoggingEnquirySink {
    async fn submit(&self, enquiry: &Enquiry) -> Result<EnquiryReceipt, IntegrationError> {
        let count = self.accepted.fetch_add(1, Ordering::Relaxed) + 1;
        let receipt = EnquiryReceipt {
            reference: Uuid::now_v7(),
            upstream_id: format!("local-{count}"),
        };
        tracing::info!(
            reference = %receipt.reference,
            name = %enquiry.name,
            contact = %enquiry.contact,
            product = enquiry.product.as_deref().unwrap_or_default(),
            "enquiry logged (forms relay not configured)"
        );
        Ok(receipt)
    }
}

/// Records every enquiry for inspection in tests.
#[derive(Debug, Default)]
pub struct InMemoryEnquirySink {
    received: Mutex<Vec<Enquiry>>,
    fail_with: Option<u16>,
}

impl InMemoryEnquirySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every submission is rejected with `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            fail_with: Some(status),
        }
    }

    pub fn received(&self) -> Vec<Enquiry> {
        lock(&self.received).clone()
    }
}

#[async_trait]
impl EnquirySink for InMemoryEnquirySink {
    async fn submit(&self, enquiry: &Enquiry) -> Result<EnquiryReceipt, IntegrationError> {
        if let Some(status) = self.fail_with {
            return Err(IntegrationError::upstream(status, "rejected by in-memory sink"));
        }
        let mut received = lock(&self.received);
        received.push(enquiry.clone());
        let receipt = EnquiryReceipt {
            reference: Uuid::now_v7(),
            upstream_id: format!("local-{}", received.len()),
        };
        Ok(receipt)
    }
}

/// Answers every lookup with the same result.
#[derive(Debug)]
pub struct StaticGeoLookup {
    answer: Option<GeoInfo>,
    seen: Mutex<Vec<IpAddr>>,
}

impl StaticGeoLookup {
    pub fn new(answer: GeoInfo) -> Self {
        Self {
            answer: Some(answer),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A lookup that always fails.
    pub fn unavailable() -> Self {
        Self {
            answer: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Addresses asked about, in order.
    pub fn seen(&self) -> Vec<IpAddr> {
        lock(&self.seen).clone()
    }
}

#[async_trait]
impl GeoLookup for StaticGeoLookup {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoInfo, IntegrationError> {
        lock(&self.seen).push(ip);
        self.answer
            .clone()
            .ok_or_else(|| IntegrationError::upstream(503, "geolocation unavailable"))
    }
}

/// Records submitted URL batches and accepts them all.
#[derive(Debug, Default)]
pub struct RecordingIndexer {
    batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        lock(&self.batches).clone()
    }
}

#[async_trait]
impl IndexingClient for RecordingIndexer {
    async fn submit(&self, urls: &[String]) -> Result<IndexingOutcome, IntegrationError> {
        lock(&self.batches).push(urls.to_vec());
        Ok(IndexingOutcome::from_status(202, "Accepted", urls.len()))
    }
}
