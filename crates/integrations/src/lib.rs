//! External collaborators: enquiry forms, visitor geolocation, search-engine
//! indexing.
//!
//! Each collaborator is a trait so the HTTP layer can run against the real
//! upstream (`reqwest` clients in this crate) or the in-memory stand-ins in
//! [`memory`] (local development and tests).

pub mod enquiry;
pub mod error;
pub mod geo;
pub mod http;
pub mod indexnow;
pub mod memory;

pub use enquiry::{Enquiry, EnquiryReceipt, EnquirySink, FieldErrors, StaticFormsClient};
pub use error::IntegrationError;
pub use geo::{GeoInfo, GeoLookup, IpApiClient};
pub use indexnow::{IndexNowClient, IndexingClient, IndexingOutcome};
