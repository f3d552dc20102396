use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use partsfront_integrations::{FieldErrors, IntegrationError};

use crate::app::services::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    tracing::error!(error = %err, "catalog unavailable");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "catalog_unavailable",
        "product catalog could not be loaded",
    )
}

pub fn integration_error_to_response(err: IntegrationError) -> axum::response::Response {
    match err {
        IntegrationError::Transport(e) => {
            tracing::error!(error = %e, "upstream unreachable");
            json_error(StatusCode::BAD_GATEWAY, "upstream_unreachable", "upstream service unreachable")
        }
        IntegrationError::Upstream { status, message } => {
            tracing::warn!(status, %message, "upstream rejected request");
            json_error(StatusCode::BAD_GATEWAY, "upstream_error", message)
        }
        IntegrationError::InvalidResponse(msg) => {
            tracing::warn!(%msg, "upstream sent an unexpected response");
            json_error(StatusCode::BAD_GATEWAY, "upstream_invalid_response", msg)
        }
    }
}

pub fn validation_error(fields: &FieldErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": "some fields are invalid",
            "fields": fields,
        })),
    )
        .into_response()
}

pub fn not_found(what: &str) -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
