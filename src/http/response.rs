//! Handler results and their wire form.
//!
//! # Responsibilities
//! - Model the three handler outcomes: content, redirect, error
//! - Render the uniform JSON error envelope
//! - Write JSON bodies with the status committed first
//!
//! # Design Decisions
//! - A body that fails to encode is logged and sent empty; the status stays
//! - Redirects carry no body

use std::fmt;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, HttpError};

/// A serialisable response body, encoded only when the response is written.
pub trait JsonBody: Send {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: Serialize + Send> JsonBody for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Successful handler outcome. Errors travel on the `Err` side of the result.
pub enum Reply {
    /// 200 with a JSON body.
    Content(Box<dyn JsonBody>),
    /// 204 with no body.
    NoContent,
    Redirect(Redirect),
}

impl Reply {
    pub fn content<T: Serialize + Send + 'static>(value: T) -> Self {
        Reply::Content(Box::new(value))
    }

    /// `None` becomes [`Reply::NoContent`].
    pub fn optional<T: Serialize + Send + 'static>(value: Option<T>) -> Self {
        value.map_or(Reply::NoContent, Reply::content)
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Content(_) => f.write_str("Content(..)"),
            Reply::NoContent => f.write_str("NoContent"),
            Reply::Redirect(r) => f.debug_tuple("Redirect").field(r).finish(),
        }
    }
}

impl From<Redirect> for Reply {
    fn from(redirect: Redirect) -> Self {
        Reply::Redirect(redirect)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Content(body) => json_response(StatusCode::OK, body.as_ref()),
            Reply::NoContent => StatusCode::NO_CONTENT.into_response(),
            Reply::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// A redirect to an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    status: StatusCode,
    location: Url,
}

impl Redirect {
    /// Fails unless `status` is one of 300-305, 307 or 308.
    pub fn new(status: StatusCode, location: Url) -> Result<Self, Error> {
        match status.as_u16() {
            300..=305 | 307 | 308 => Ok(Self { status, location }),
            _ => Err(Error::InvalidRedirect(status)),
        }
    }

    pub fn multiple_choices(location: Url) -> Self {
        Self { status: StatusCode::MULTIPLE_CHOICES, location }
    }

    pub fn moved_permanently(location: Url) -> Self {
        Self { status: StatusCode::MOVED_PERMANENTLY, location }
    }

    pub fn found(location: Url) -> Self {
        Self { status: StatusCode::FOUND, location }
    }

    pub fn see_other(location: Url) -> Self {
        Self { status: StatusCode::SEE_OTHER, location }
    }

    pub fn not_modified(location: Url) -> Self {
        Self { status: StatusCode::NOT_MODIFIED, location }
    }

    pub fn use_proxy(location: Url) -> Self {
        Self { status: StatusCode::USE_PROXY, location }
    }

    pub fn temporary(location: Url) -> Self {
        Self { status: StatusCode::TEMPORARY_REDIRECT, location }
    }

    pub fn permanent(location: Url) -> Self {
        Self { status: StatusCode::PERMANENT_REDIRECT, location }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn location(&self) -> &Url {
        &self.location
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(self.location.as_str()) {
            Ok(location) => (self.status, [(header::LOCATION, location)]).into_response(),
            Err(e) => {
                tracing::error!(error = %e, location = %self.location, "could not write redirect location");
                ErrorEnvelope::from(&HttpError::internal()).into_response()
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub status_text: String,
    pub message: String,
}

impl From<&HttpError> for ErrorEnvelope {
    fn from(err: &HttpError) -> Self {
        Self {
            status_code: err.status().as_u16(),
            status_text: err.status().canonical_reason().unwrap_or_default().to_string(),
            message: err.message().to_string(),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        json_response(status, &self)
    }
}

fn json_response(status: StatusCode, body: &dyn JsonBody) -> Response {
    let bytes = match body.to_json() {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "could not encode response body");
            Vec::new()
        }
    };
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(bytes),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("broken"))
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_content_reply() {
        let response = Reply::content(serde_json::json!({"a": 1})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_bytes(response).await, br#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_no_content_reply() {
        let response = Reply::optional(None::<String>).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_redirect_reply() {
        let response = Reply::from(Redirect::see_other(url("http://example.org/x"))).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "http://example.org/x");
        assert!(body_bytes(response).await.is_empty());
    }

    #[test]
    fn test_redirect_status_family() {
        let location = url("http://example.org/");
        for code in [300, 301, 302, 303, 304, 305, 307, 308] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(Redirect::new(status, location.clone()).is_ok(), "{code}");
        }
        for code in [200, 306, 309, 404] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(Redirect::new(status, location.clone()).is_err(), "{code}");
        }
        assert_eq!(Redirect::permanent(location).status(), StatusCode::PERMANENT_REDIRECT);
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = ErrorEnvelope::from(&HttpError::method_not_allowed()).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_bytes(response).await,
            br#"{"statusCode":405,"statusText":"Method Not Allowed","message":"method not allowed"}"#
        );
    }

    #[tokio::test]
    async fn test_encode_failure_keeps_status() {
        let response = Reply::content(Broken).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }
}
