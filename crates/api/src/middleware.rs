use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::app::errors;
use crate::context::ClientContext;

/// Attach a [`ClientContext`] and log the request outcome.
pub async fn client_context(mut req: Request<Body>, next: Next) -> Response {
    let client = ClientContext::from_request(&req);
    req.extensions_mut().insert(client);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

#[derive(Clone)]
pub struct IndexNowGuard {
    /// Shared secret; no request passes while this is `None`.
    pub key: Option<Arc<str>>,
}

#[derive(Debug, Deserialize)]
struct SecretParam {
    secret: Option<String>,
}

/// Reject indexing requests whose `?secret=` does not match the IndexNow key.
pub async fn require_indexnow_secret(
    State(guard): State<IndexNowGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(key) = guard.key.as_deref() else {
        tracing::warn!("indexing request refused; no IndexNow key configured");
        return Err(unauthorized());
    };

    let supplied = Query::<SecretParam>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(p)| p.secret);

    match supplied {
        Some(secret) if secret == key => Ok(next.run(req).await),
        _ => {
            tracing::warn!("indexing request with missing or wrong secret");
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
}
