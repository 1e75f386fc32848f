//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use vehicle_service::http::server::build_router;
use vehicle_service::repository::InMemoryRepository;
use vehicle_service::service::{self, MalformedIdPolicy, VehicleService};

pub const HOST: &str = "processing.envirocar.org";

/// The full layered router over the fixture repository.
pub fn app() -> Router {
    app_with_policy(MalformedIdPolicy::default())
}

pub fn app_with_policy(policy: MalformedIdPolicy) -> Router {
    let service = VehicleService::new(Arc::new(InMemoryRepository::fixtures())).with_malformed_id(policy);
    let dispatcher = service::dispatcher(Arc::new(service)).unwrap();
    build_router(Arc::new(dispatcher))
}

/// A response reduced to what the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Send one request through `app` in-process.
pub async fn send(app: Router, method: Method, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri).header("host", HOST);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, &[]).await
}
