//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → environment overlay (DB_USER, DB_PASS, DB_NAME, DB_ADDR, PORT, LOG_FORMAT)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, ConfigError};
pub use schema::{DatabaseConfig, HandlerConfig, ListenerConfig, LogFormat, LoggingConfig, ServiceConfig};
pub use validation::{validate_config, ValidationError};
