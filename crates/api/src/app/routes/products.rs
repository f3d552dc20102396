use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use partsfront_core::Category;

use crate::app::dto::{CategoryResponse, ListProductsParams, ProductDetail, ProductListResponse, ProductSummary};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:category/:slug", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListProductsParams>,
) -> axum::response::Response {
    let catalog = match services.catalog().await {
        Ok(c) => c,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let query = params.to_query();
    let items: Vec<ProductSummary> = catalog
        .query(&query)
        .into_iter()
        .map(|p| ProductSummary::from_product(p, &services.site_url))
        .collect();

    let category = query
        .category
        .as_deref()
        .and_then(|key| key.parse::<Category>().ok())
        .map(|c| CategoryResponse::new(c, catalog.count_in(c)));

    Json(ProductListResponse {
        total: items.len(),
        category,
        items,
    })
    .into_response()
}

/// Product page data. Non-canonical URLs that still identify a product are
/// answered with a 301 to the canonical path.
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path((category, slug)): Path<(String, String)>,
) -> axum::response::Response {
    let catalog = match services.catalog().await {
        Ok(c) => c,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let Some(resolved) = catalog.resolve(&slug) else {
        tracing::debug!(%category, %slug, "no product for slug");
        return errors::not_found("product");
    };

    if let Some(location) = resolved.redirect_for(&category, &slug) {
        tracing::debug!(
            from = %format!("/products/{category}/{slug}"),
            to = %location,
            matched_by = ?resolved.matched_by,
            "redirecting to canonical product url"
        );
        return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
    }

    Json(ProductDetail::from_product(resolved.product, &services.site_url)).into_response()
}
