//! Reverse URL building.
//!
//! Turns a route name and its parameters into the absolute URL a client
//! should use, as seen through any fronting proxy.
//!
//! # Algorithm
//! 1. Look up the route by name, expand its template
//! 2. Use the current request's host
//! 3. `X-Forwarded-Prefix` is prepended to the path
//! 4. `X-Forwarded-Proto` replaces the scheme
//! 5. `X-Forwarded-Port` is rendered unless it is the default port of the
//!    (possibly overridden) scheme
//!
//! Step 4 must run before step 5.

use std::sync::Arc;

use axum::http::HeaderMap;
use url::Url;

use super::router::RouteRegistry;
use crate::error::Error;

pub const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_PORT: &str = "x-forwarded-port";

/// Reverse-proxy rewriting headers of one request. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub prefix: Option<String>,
    pub proto: Option<String>,
    pub port: Option<String>,
}

impl ForwardedHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            prefix: get(X_FORWARDED_PREFIX),
            proto: get(X_FORWARDED_PROTO),
            port: get(X_FORWARDED_PORT),
        }
    }
}

/// Builds absolute URLs for registered routes on behalf of one request.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    registry: Arc<RouteRegistry>,
    host: Option<String>,
    forwarded: ForwardedHeaders,
}

impl UrlBuilder {
    pub fn new(registry: Arc<RouteRegistry>, host: Option<String>, forwarded: ForwardedHeaders) -> Self {
        Self {
            registry,
            host,
            forwarded,
        }
    }

    /// The absolute URL of route `name` with `params` substituted.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let route = self
            .registry
            .get(name)
            .ok_or_else(|| Error::RouteNotFound(name.to_string()))?;
        let path = route.template().expand(params)?;
        compose(self.host.as_deref(), &path, &self.forwarded)
    }
}

/// Combine host, expanded path and forwarding headers into an absolute URL.
pub fn compose(host: Option<&str>, path: &str, forwarded: &ForwardedHeaders) -> Result<Url, Error> {
    let host = host.filter(|h| !h.is_empty()).ok_or(Error::MissingHost)?;
    let mut url = Url::parse(&format!("http://{host}"))?;

    match &forwarded.prefix {
        Some(prefix) => url.set_path(&format!("{}{}", prefix.trim_end_matches('/'), path)),
        None => url.set_path(path),
    }

    if let Some(proto) = &forwarded.proto {
        url.set_scheme(proto).map_err(|()| Error::InvalidForwardedHeader {
            header: X_FORWARDED_PROTO,
            value: proto.clone(),
        })?;
    }

    if let Some(port) = &forwarded.port {
        let current = url.port().map(|p| p.to_string());
        let render = match url.scheme() {
            "https" => port != "443",
            "http" => port != "80",
            _ => false,
        };
        if current.as_deref() != Some(port.as_str()) && render {
            let invalid = || Error::InvalidForwardedHeader {
                header: X_FORWARDED_PORT,
                value: port.clone(),
            };
            let number: u16 = port.parse().map_err(|_| invalid())?;
            url.set_port(Some(number)).map_err(|()| invalid())?;
        }
    }

    Ok(url)
}
