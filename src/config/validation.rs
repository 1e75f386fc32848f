//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (pool size > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyListenerHost,

    #[error("database.name must not be empty")]
    EmptyDatabaseName,

    #[error("database.address '{0}' is not host:port")]
    InvalidDatabaseAddress(String),

    #[error("database.pool_size must be greater than zero")]
    ZeroPoolSize,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyListenerHost);
    }
    if config.database.name.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseName);
    }
    if config.database.host_and_port().is_none() {
        errors.push(ValidationError::InvalidDatabaseAddress(config.database.address.clone()));
    }
    if config.database.pool_size == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
