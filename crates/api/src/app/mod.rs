//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: collaborator wiring and per-request catalog loads
//! - `site.rs`: the public URL set shared by the sitemap and IndexNow
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use partsfront_integrations::IntegrationError;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod site;

use services::AppServices;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Result<Router, IntegrationError> {
    let services = AppServices::from_config(config)?;
    Ok(build_app_with(services))
}

/// Build the router around already-wired services.
pub fn build_app_with(services: AppServices) -> Router {
    let guard = middleware::IndexNowGuard {
        key: services.indexnow_key.as_deref().map(Arc::from),
    };
    let services = Arc::new(services);

    let indexing = routes::indexnow::router().layer(axum::middleware::from_fn_with_state(
        guard,
        middleware::require_indexnow_secret,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest("/api/indexnow", indexing)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::client_context))
                .layer(Extension(services)),
        )
}
