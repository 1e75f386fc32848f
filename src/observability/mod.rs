//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events and spans (request span carries request_id, method, uri)
//!
//! logging.rs installs the global subscriber:
//!     → EnvFilter (RUST_LOG, else configured filter)
//!     → fmt layer (pretty) or JSON layer
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every event of a request via its span
//! - A dispatcher can be given its own subscriber, isolating its log output

pub mod logging;

pub use logging::{build_filter, init_tracing};
