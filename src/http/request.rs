//! Request correlation.
//!
//! The id itself is generated by tower-http's `SetRequestIdLayer` (UUID v4)
//! and echoed back by `PropagateRequestIdLayer`; handlers only read it.

use axum::http::{HeaderMap, HeaderName};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The request id attached to `headers`, or `"unknown"` when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
