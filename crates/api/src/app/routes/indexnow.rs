use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::dto::{IndexNowParams, IndexNowRequest, IndexNowResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::app::site::{site_pages, static_pages};

/// Mounted under `/api/indexnow` behind the secret guard.
pub fn router() -> Router {
    Router::new().route("/", get(submit_from_query).post(submit_from_body))
}

pub async fn submit_from_body(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<IndexNowRequest>,
) -> axum::response::Response {
    let urls = if body.all {
        all_urls(&services).await
    } else if let Some(urls) = body.urls {
        urls
    } else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            r#"Provide { "urls": [...] } or { "all": true }"#,
        );
    };

    if urls.is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_request", "No URLs to submit");
    }
    submit(&services, urls).await
}

/// Browser-friendly trigger: `?all=true` submits every page, otherwise only
/// the home page.
pub async fn submit_from_query(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<IndexNowParams>,
) -> axum::response::Response {
    let urls = if params.all.as_deref() == Some("true") {
        all_urls(&services).await
    } else {
        vec![services.site_url.clone()]
    };
    submit(&services, urls).await
}

async fn submit(services: &AppServices, urls: Vec<String>) -> axum::response::Response {
    match services.indexer.submit(&urls).await {
        Ok(outcome) => Json(IndexNowResponse::new(outcome, urls)).into_response(),
        Err(e) => errors::integration_error_to_response(e),
    }
}

async fn all_urls(services: &AppServices) -> Vec<String> {
    let pages = match services.catalog().await {
        Ok(catalog) => site_pages(&catalog),
        Err(e) => {
            tracing::warn!(error = %e, "submitting static pages only");
            static_pages()
        }
    };
    pages.iter().map(|p| services.absolute_url(&p.path)).collect()
}
