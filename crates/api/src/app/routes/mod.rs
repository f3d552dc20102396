use axum::{Router, routing::{get, post}};

pub mod enquiry;
pub mod geo;
pub mod indexnow;
pub mod products;
pub mod sitemap;
pub mod system;

/// Router for every public endpoint except `/health` and the indexing routes.
pub fn router() -> Router {
    Router::new()
        .route("/categories", get(system::categories))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .nest("/products", products::router())
        .route("/api/enquiry", post(enquiry::submit_enquiry))
        .route("/api/geo", get(geo::visitor_geo))
}
