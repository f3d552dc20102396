use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};

/// Who is calling, as far as the proxy headers tell.
///
/// Inserted into every request by [`crate::middleware::client_context`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    ip: Option<IpAddr>,
}

impl ClientContext {
    pub fn new(ip: Option<IpAddr>) -> Self {
        Self { ip }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    /// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Self::new(forwarded_ip(req.headers()).or(peer))
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    header("x-forwarded-for")
        .and_then(|list| list.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or_else(|| header("x-real-ip").and_then(|v| v.trim().parse().ok()))
}
