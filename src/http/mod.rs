//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id + trace layers)
//!     → dispatch.rs (route match, 404/405 sentinels)
//!     → context.rs (params, request head, request id, reverse URLs)
//!     → handler (business logic)
//!     → response.rs (content | redirect | error envelope)
//!     → Send to client
//! ```

pub mod context;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;

pub use context::RequestContext;
pub use dispatch::{Dispatcher, DispatcherBuilder, Handler, HandlerFuture};
pub use request::X_REQUEST_ID;
pub use response::{ErrorEnvelope, Redirect, Reply};
pub use server::HttpServer;
