//! Header allow-lists for the relay.
//!
//! # Responsibilities
//! - Select the inbound headers that may reach the upstream
//! - Select the upstream response headers that may reach the caller
//!
//! # Design Decisions
//! - Explicit allow-lists, never a blanket copy
//! - Host, content-length and content-type of the inbound request are
//!   never forwarded; the outbound multipart body gets its own

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};

/// Inbound headers copied onto the upstream request.
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 2] = [header::AUTHORIZATION, header::COOKIE];

/// Upstream response headers copied onto the relayed response.
pub const RELAYED_RESPONSE_HEADERS: [HeaderName; 1] = [header::CONTENT_TYPE];

/// Copy the allow-listed request headers, keeping repeated values.
/// Empty values are not forwarded.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    allow_listed(inbound, &FORWARDED_REQUEST_HEADERS, |value| !value.is_empty())
}

/// Copy the allow-listed response headers, keeping repeated values.
pub fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    allow_listed(upstream, &RELAYED_RESPONSE_HEADERS, |_| true)
}

fn allow_listed(
    source: &HeaderMap,
    allowed: &[HeaderName],
    keep: impl Fn(&HeaderValue) -> bool,
) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in allowed {
        for value in source.get_all(name).iter().filter(|value| keep(*value)) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}
