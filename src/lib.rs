//! Hypermedia HTTP service for the vehicle registry.
//!
//! Serves manufacturers, vehicle types and power sources as JSON with
//! absolute links. Links are built by route name through the routing core
//! and honor `X-Forwarded-Prefix`, `X-Forwarded-Proto` and
//! `X-Forwarded-Port` set by a reverse proxy.

pub mod config;
pub mod error;
pub mod http;
pub mod hypermedia;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod repository;
pub mod routing;
pub mod service;

pub use config::ServiceConfig;
pub use error::{Error, HttpError, Result};
pub use http::{Dispatcher, HttpServer, Reply, RequestContext};
pub use lifecycle::Shutdown;
pub use service::VehicleService;
