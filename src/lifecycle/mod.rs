//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() resolves
//!     → HTTP server stops accepting, drains in-flight requests, exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, repository, dispatcher, listener
//! - Ordered shutdown: stop accept, drain, close

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
