//! The vehicle service: route table and business handlers.
//!
//! # Data Flow
//! ```text
//! register()
//!     → one named route per handler (routes::*)
//!     → DispatcherBuilder
//!
//! handler(ctx)
//!     → Repository lookup
//!     → attach links via ctx.url_for(route name, params)
//!     → Reply::content(entity)
//! ```
//!
//! # Design Decisions
//! - Handlers name their link targets by route name, never by path
//! - Absent entities pass through as 404; other repository failures are
//!   logged and answered with the generic 500

mod handlers;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, HttpError};
use crate::http::{Dispatcher, DispatcherBuilder, Handler, Reply, RequestContext};
use crate::repository::Repository;
use crate::routing::RegistrationError;

/// Route names, used for registration and reverse routing.
pub mod routes {
    pub const ROOT: &str = "root";
    pub const MANUFACTURERS: &str = "manufacturers";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const VEHICLES: &str = "vehicles";
    pub const VEHICLE: &str = "vehicle";
    pub const POWER_SOURCES: &str = "power_sources";
    pub const POWER_SOURCE: &str = "power_source";
}

/// How a power source id that is not an integer is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedIdPolicy {
    /// 400, the input is wrong.
    #[default]
    BadRequest,
    /// 404, no resource has that id.
    NotFound,
}

impl MalformedIdPolicy {
    pub fn reject(self, raw: &str) -> HttpError {
        let message = format!("id is bad '{raw}'");
        match self {
            MalformedIdPolicy::BadRequest => HttpError::bad_request_with(message),
            MalformedIdPolicy::NotFound => HttpError::not_found_with(message),
        }
    }
}

/// Read-only hypermedia API over a [`Repository`].
pub struct VehicleService {
    repository: Arc<dyn Repository>,
    malformed_id: MalformedIdPolicy,
}

impl VehicleService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            malformed_id: MalformedIdPolicy::default(),
        }
    }

    pub fn with_malformed_id(mut self, policy: MalformedIdPolicy) -> Self {
        self.malformed_id = policy;
        self
    }

    pub fn malformed_id(&self) -> MalformedIdPolicy {
        self.malformed_id
    }
}

/// Adapt a `VehicleService` method into a [`Handler`].
fn bind<F, Fut>(service: &Arc<VehicleService>, method: F) -> impl Handler
where
    F: Fn(Arc<VehicleService>, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Reply, Error>> + Send + 'static,
{
    let service = service.clone();
    move |ctx: RequestContext| method(service.clone(), ctx)
}

/// Register every route of the service on `builder`.
pub fn register(builder: &mut DispatcherBuilder, service: Arc<VehicleService>) -> Result<(), RegistrationError> {
    builder
        .get(routes::ROOT, "/", bind(&service, VehicleService::root))?
        .get(routes::MANUFACTURERS, "/manufacturers", bind(&service, VehicleService::manufacturers))?
        .get(routes::MANUFACTURER, "/manufacturers/{hsn}", bind(&service, VehicleService::manufacturer))?
        .get(routes::VEHICLES, "/manufacturers/{hsn}/vehicles", bind(&service, VehicleService::vehicles))?
        .get(routes::VEHICLE, "/manufacturers/{hsn}/vehicles/{tsn}", bind(&service, VehicleService::vehicle))?
        .get(routes::POWER_SOURCES, "/powerSources", bind(&service, VehicleService::power_sources))?
        .get(routes::POWER_SOURCE, "/powerSources/{id}", bind(&service, VehicleService::power_source))?;
    Ok(())
}

/// Build a dispatcher serving only this service.
pub fn dispatcher(service: Arc<VehicleService>) -> Result<Dispatcher, RegistrationError> {
    let mut builder = Dispatcher::builder();
    register(&mut builder, service)?;
    Ok(builder.build())
}
