//! Relaying the upstream response back to the caller.
//!
//! Status and the allow-listed headers are taken from the response head;
//! the body is streamed through untouched, whatever the status.

use axum::{body::Body, response::Response};

use crate::security::headers::relayed_headers;

/// Turn an upstream response into the caller's response.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = relayed_headers(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
