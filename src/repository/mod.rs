//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Repository trait
//!         → postgres.rs (deadpool-postgres pool, one query per call)
//!         → memory.rs   (fixture data, tests and --in-memory mode)
//!     → entity | RepositoryError::NotFound (404) | other error (500)
//! ```
//!
//! # Design Decisions
//! - Absent entities are a classified error, driver failures are not
//! - The repository owns its pool; no timeouts or retries are added here

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::model::{Manufacturer, PowerSource, Vehicle};

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

/// Errors returned by a [`Repository`].
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found")]
    NotFound,

    #[error("database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("{0}")]
    Backend(String),
}

impl RepositoryError {
    /// Only an absent entity carries a status; everything else is opaque.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RepositoryError::NotFound => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }
}

/// Read access to manufacturers, vehicles and power sources.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError>;

    async fn manufacturer(&self, hsn: &str) -> Result<Manufacturer, RepositoryError>;

    /// Summary rows (tsn, names, allotment date) of the manufacturer's vehicles.
    async fn vehicles(&self, manufacturer: &Manufacturer) -> Result<Vec<Vehicle>, RepositoryError>;

    /// A full vehicle with its manufacturer and power source attached.
    async fn vehicle(&self, manufacturer: &Manufacturer, tsn: &str) -> Result<Vehicle, RepositoryError>;

    async fn power_sources(&self) -> Result<Vec<PowerSource>, RepositoryError>;

    async fn power_source(&self, id: i32) -> Result<PowerSource, RepositoryError>;
}
