//! Visitor enquiries and their relay to the forms service.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IntegrationError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s-]{10,}$").expect("phone pattern"));

const MIN_MESSAGE_CHARS: usize = 10;

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// An enquiry as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enquiry {
    pub name: String,
    pub company: Option<String>,
    /// Email address or phone number.
    #[serde(alias = "contact-info")]
    pub contact: String,
    pub message: String,
    /// Product the visitor was looking at, if any.
    pub product: Option<String>,
}

impl Enquiry {
    /// Copy with every field trimmed and blank optionals dropped.
    pub fn normalized(&self) -> Self {
        let trim_opt = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            name: self.name.trim().to_string(),
            company: trim_opt(&self.company),
            contact: self.contact.trim().to_string(),
            message: self.message.trim().to_string(),
            product: trim_opt(&self.product),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Name is required".to_string());
        }

        let contact = self.contact.trim();
        if contact.is_empty() {
            errors.insert("contact", "Email or phone is required".to_string());
        } else if !EMAIL.is_match(contact) && !PHONE.is_match(contact) {
            errors.insert(
                "contact",
                "Enter a valid email or phone number (min 10 digits)".to_string(),
            );
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.insert("message", "Message is required".to_string());
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.insert(
                "message",
                format!("Message must be at least {MIN_MESSAGE_CHARS} characters long"),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn contact_is_email(&self) -> bool {
        EMAIL.is_match(self.contact.trim())
    }

    /// Message text with the product reference prepended.
    pub fn full_message(&self) -> String {
        match &self.product {
            Some(product) => format!("Product: {product}\n\n{}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Acknowledgement of a relayed enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnquiryReceipt {
    /// Locally assigned id, logged alongside the relay.
    pub reference: Uuid,
    /// Id assigned by the forms service.
    pub upstream_id: String,
}

/// Destination for validated enquiries.
#[async_trait]
pub trait EnquirySink: Send + Sync {
    async fn submit(&self, enquiry: &Enquiry) -> Result<EnquiryReceipt, IntegrationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StaticFormsPayload<'a> {
    name: &'a str,
    company: &'a str,
    #[serde(rename = "contact-info")]
    contact: &'a str,
    message: String,
    access_key: &'a str,
    subject: &'a str,
    reply_to: &'a str,
}

/// Relays enquiries to a StaticForms-compatible endpoint.
#[derive(Debug, Clone)]
pub struct StaticFormsClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: String,
    subject: String,
}

impl StaticFormsClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            subject: subject.into(),
        }
    }

    fn payload<'a>(&'a self, enquiry: &'a Enquiry) -> StaticFormsPayload<'a> {
        StaticFormsPayload {
            name: &enquiry.name,
            company: enquiry.company.as_deref().unwrap_or_default(),
            contact: &enquiry.contact,
            message: enquiry.full_message(),
            access_key: &self.access_key,
            subject: &self.subject,
            // the service rejects submissions without a replyTo
            reply_to: if enquiry.contact_is_email() { enquiry.contact.as_str() } else { "@" },
        }
    }
}

#[async_trait]
impl EnquirySink for StaticFormsClient {
    async fn submit(&self, enquiry: &Enquiry) -> Result<EnquiryReceipt, IntegrationError> {
        let reference = Uuid::now_v7();
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.payload(enquiry))
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| IntegrationError::invalid_response(e.to_string()))?;

        let receipt = parse_receipt(reference, status.as_u16(), &body)?;
        tracing::info!(%reference, upstream_id = %receipt.upstream_id, "enquiry relayed");
        Ok(receipt)
    }
}

/// Success needs a 2xx status and an `id` in the body.
fn parse_receipt(reference: Uuid, status: u16, body: &serde_json::Value) -> Result<EnquiryReceipt, IntegrationError> {
    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("no message")
        .to_string();

    if !(200..300).contains(&status) {
        return Err(IntegrationError::upstream(status, message));
    }

    let upstream_id = match body.get("id") {
        Some(serde_json::Value::String(id)) if !id.is_empty() => id.clone(),
        Some(serde_json::Value::Number(id)) => id.to_string(),
        _ => return Err(IntegrationError::upstream(status, format!("missing submission id: {message}"))),
    };

    Ok(EnquiryReceipt {
        reference,
        upstream_id,
    })
}
