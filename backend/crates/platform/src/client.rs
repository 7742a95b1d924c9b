//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Client context derived from a request
///
/// Carries the network origin and the client agent string that login
/// attempts and bans are keyed and annotated with.
#[derive(Debug, Clone)]
pub struct ClientContext {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub origin: Option<IpAddr>,
    /// Original User-Agent string (for the attempt ledger)
    pub agent: Option<String>,
}

impl ClientContext {
    /// Create a new client context
    pub fn new(origin: Option<IpAddr>, agent: Option<String>) -> Self {
        Self { origin, agent }
    }

    /// Get the origin as a string (for database storage)
    ///
    /// Falls back to "unknown" so that attempts from clients without a
    /// resolvable address still accumulate under one key.
    pub fn origin_string(&self) -> String {
        self.origin
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Extract the client context from request headers
///
/// The origin is resolved via [`extract_client_ip`]; the agent is the raw
/// User-Agent header if present.
pub fn extract_client_context(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientContext {
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    ClientContext::new(extract_client_ip(headers, direct_ip), agent)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
