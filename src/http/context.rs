//! Per-request context handed to handlers.

use axum::http::{request::Parts, HeaderMap, Method};
use tracing::Span;
use url::Url;

use crate::error::Error;
use crate::routing::{PathParams, UrlBuilder};

/// Everything a handler knows about the request it is serving.
///
/// Created by the dispatcher for a single request and dropped once the
/// response is built.
#[derive(Debug)]
pub struct RequestContext {
    params: PathParams,
    request: Parts,
    request_id: String,
    span: Span,
    urls: UrlBuilder,
}

impl RequestContext {
    pub(crate) fn new(params: PathParams, request: Parts, request_id: String, span: Span, urls: UrlBuilder) -> Self {
        Self {
            params,
            request,
            request_id,
            span,
            urls,
        }
    }

    /// Value of a path placeholder.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// The raw request head (method, URI, headers).
    pub fn request(&self) -> &Parts {
        &self.request
    }

    pub fn method(&self) -> &Method {
        &self.request.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.request.headers
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Span carrying the request id. Handler futures already run inside it.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Absolute URL of another route (or this one) as the client sees it.
    pub fn url_for(&self, route: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        self.urls.url_for(route, params)
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }
}
