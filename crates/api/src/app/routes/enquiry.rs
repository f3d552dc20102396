use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use partsfront_integrations::Enquiry;

use crate::app::dto::EnquiryAccepted;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn submit_enquiry(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Enquiry>,
) -> axum::response::Response {
    let enquiry = body.normalized();
    if let Err(fields) = enquiry.validate() {
        tracing::debug!(fields = ?fields.keys().collect::<Vec<_>>(), "enquiry rejected");
        return errors::validation_error(&fields);
    }

    match services.enquiries.submit(&enquiry).await {
        Ok(receipt) => (StatusCode::OK, Json(EnquiryAccepted::from(receipt))).into_response(),
        Err(e) => errors::integration_error_to_response(e),
    }
}
