//! Request inspection helpers.
//!
//! # Responsibilities
//! - Derive the correlation id (inbound `X-Request-ID` or a fresh UUID v4)
//! - Determine the host used for reverse URLs
//!
//! # Design Decisions
//! - An inbound request id is propagated unchanged so traces join across hops
//! - The `Host` header wins over the URI authority (HTTP/1.1 vs HTTP/2)

use axum::http::{header, request::Parts, HeaderMap};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation id of a request.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Host the client addressed, including any explicit port.
pub fn host(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| parts.uri.authority().map(|a| a.to_string()))
}
