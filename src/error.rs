//! Error classification.
//!
//! # Responsibilities
//! - Carry an HTTP status on expected failures (not found, bad input)
//! - Leave infrastructure failures unclassified
//! - Resolve every error into exactly one status at the dispatch boundary
//!
//! # Design Decisions
//! - Classification is optional on the error value, mandatory at the boundary
//! - Unclassified errors become 500 with a generic message; the cause is only logged

use axum::http::StatusCode;

use crate::repository::RepositoryError;

/// Result alias used by handlers and the routing core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error carrying an explicit HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    /// Create a classified error with a custom message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404, used for unmatched paths and absent entities.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found")
    }

    /// 405, used when a path matched but the method did not.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad request")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    /// 404 with a message naming the failing input.
    pub fn not_found_with(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 400 with a message naming the failing input.
    pub fn bad_request_with(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced by handlers, the reverse URL builder and the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("no value for path parameter '{param}' in template '{template}'")]
    MissingParameter { template: String, param: String },

    #[error("request carries no host")]
    MissingHost,

    #[error("invalid {header} header: '{value}'")]
    InvalidForwardedHeader { header: &'static str, value: String },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0} is not a redirect status")]
    InvalidRedirect(StatusCode),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl Error {
    /// The status this error carries, if it is classified.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(e) => Some(e.status()),
            Error::Repository(e) => e.status(),
            _ => None,
        }
    }
}

/// Resolve an error into the classified error that is sent to the client.
///
/// Classified errors keep their status and message. Anything else becomes the
/// generic 500 so infrastructure details never reach the response body.
pub fn classify(err: &Error) -> HttpError {
    match err.status() {
        Some(status) => HttpError::new(status, err.to_string()),
        None => HttpError::internal(),
    }
}
