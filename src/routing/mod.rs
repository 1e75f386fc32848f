//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (name, template, methods)
//!     → template.rs (parse placeholders, strict-slash normalisation)
//!     → router.rs (reject duplicate names / routes)
//!     → Freeze as immutable RouteRegistry behind an Arc
//!
//! Incoming Request (method, path)
//!     → router.rs (most specific template wins)
//!     → Return: Matched(route, params) | MethodNotAllowed | NotFound
//!
//! Reverse routing (inside a handler):
//!     (route name, params)
//!     → router.rs (lookup by name)
//!     → template.rs (expand placeholders)
//!     → reverse.rs (request host + X-Forwarded-* overrides)
//!     → absolute Url
//! ```
//!
//! # Design Decisions
//! - Routes are registered once, immutable at runtime (no locks)
//! - Route identity is a caller-supplied name, never derived from the handler
//! - Any host matches; the host is only used to build absolute URLs
//! - Method mismatch is distinguished from path mismatch

pub mod reverse;
pub mod router;
pub mod template;

pub use reverse::{ForwardedHeaders, UrlBuilder};
pub use router::{Resolution, Route, RouteRegistry};
pub use template::{PathParams, PathTemplate};

/// Startup-time registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("{method} {template} is already registered as '{existing}'")]
    DuplicateRoute {
        method: String,
        template: String,
        existing: String,
    },

    #[error("route '{0}' allows no methods")]
    NoMethods(String),
}
