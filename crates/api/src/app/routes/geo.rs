use std::sync::Arc;

use axum::{extract::Extension, Json};

use partsfront_integrations::GeoInfo;

use crate::app::services::AppServices;
use crate::context::ClientContext;

/// Country of the caller. Always 200; unknown fields are null.
pub async fn visitor_geo(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(client): Extension<ClientContext>,
) -> Json<GeoInfo> {
    let Some(ip) = client.ip() else {
        return Json(GeoInfo::unknown());
    };

    match services.geo.lookup(ip).await {
        Ok(info) => Json(info),
        Err(e) => {
            tracing::warn!(error = %e, %ip, "geo lookup failed");
            Json(GeoInfo::unknown())
        }
    }
}
