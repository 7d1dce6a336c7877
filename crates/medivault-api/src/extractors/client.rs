//! Best-effort client identification for the share access log.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use medivault_service::ClientInfo;

use crate::state::AppState;

/// Client address and user agent. Never rejects; unknown values stay `None`.
#[derive(Debug, Clone, Default)]
pub struct RemoteClient(pub ClientInfo);

impl RemoteClient {
    /// Unwraps into the service-level client info.
    pub fn into_inner(self) -> ClientInfo {
        self.0
    }
}

impl FromRequestParts<AppState> for RemoteClient {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(RemoteClient(ClientInfo {
            ip_address: client_ip(
                &parts.headers,
                peer,
                state.config.server.trust_proxy_headers,
            ),
            user_agent: header(&parts.headers, USER_AGENT.as_str()),
        }))
    }
}

/// Proxy headers win only when trusted; otherwise the socket peer is used.
fn client_ip(headers: &HeaderMap, peer: Option<String>, trust_proxy: bool) -> Option<String> {
    if trust_proxy {
        forwarded_ip(headers).or(peer)
    } else {
        peer
    }
}

/// First `X-Forwarded-For` entry, then `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    header(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header(headers, "x-real-ip"))
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
