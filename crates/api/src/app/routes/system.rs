use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use partsfront_core::Category;

use crate::app::dto::CategoryResponse;
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn categories(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let catalog = match services.catalog().await {
        Ok(c) => c,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let items: Vec<CategoryResponse> = Category::ALL
        .iter()
        .map(|&c| CategoryResponse::new(c, catalog.count_in(c)))
        .collect();

    Json(items).into_response()
}
