//! Request dispatch.
//!
//! # Responsibilities
//! - Register handlers under stable route names (startup only)
//! - Match each request, build its [`RequestContext`], invoke the handler
//! - Resolve the handler result into a response: content, redirect or error
//!
//! # Design Decisions
//! - Routing failures (404/405) go through the same error path as handler errors
//! - Every handler future runs inside a span carrying the request id
//! - An optional `tracing::Dispatch` scopes all request logging to one subscriber

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{request::Parts, Method, Request},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use tracing::{instrument::WithSubscriber, Dispatch, Instrument, Span};

use super::context::RequestContext;
use super::request;
use super::response::{ErrorEnvelope, Reply};
use crate::error::{classify, Error, HttpError};
use crate::routing::{ForwardedHeaders, RegistrationError, Resolution, RouteRegistry, UrlBuilder};

/// Future returned by a [`Handler`].
pub type HandlerFuture = BoxFuture<'static, Result<Reply, Error>>;

/// A request handler. Implemented for every `Fn(RequestContext) -> impl Future`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Reply, Error>> + Send + 'static,
{
    fn call(&self, ctx: RequestContext) -> HandlerFuture {
        Box::pin(self(ctx))
    }
}

/// Collects routes before the dispatcher is frozen.
#[derive(Default)]
pub struct DispatcherBuilder {
    registry: RouteRegistry,
    handlers: Vec<Arc<dyn Handler>>,
    log: Option<Dispatch>,
}

impl DispatcherBuilder {
    /// Register `handler` for `methods` on `template` under the route `name`.
    pub fn route(
        &mut self,
        name: &str,
        template: &str,
        methods: &[Method],
        handler: impl Handler,
    ) -> Result<&mut Self, RegistrationError> {
        let index = self.registry.register(name, template, methods)?;
        debug_assert_eq!(index, self.handlers.len());
        self.handlers.push(Arc::new(handler));
        tracing::info!(route = %name, template = %template, "Registered route");
        Ok(self)
    }

    /// Register a `GET` route.
    pub fn get(&mut self, name: &str, template: &str, handler: impl Handler) -> Result<&mut Self, RegistrationError> {
        self.route(name, template, &[Method::GET], handler)
    }

    /// Send all request logging to `dispatch` instead of the global subscriber.
    pub fn log_dispatch(&mut self, dispatch: Dispatch) -> &mut Self {
        self.log = Some(dispatch);
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: Arc::new(self.registry),
            handlers: self.handlers,
            log: self.log,
        }
    }
}

/// Immutable route table plus handlers. Shared across all requests.
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
    handlers: Vec<Arc<dyn Handler>>,
    log: Option<Dispatch>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Serve one request.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let (parts, _body) = request.into_parts();
        let request_id = request::request_id(&parts.headers);

        match &self.log {
            Some(dispatch) => {
                let span = tracing::dispatcher::with_default(dispatch, || request_span(&parts, &request_id));
                self.respond(parts, request_id, span.clone())
                    .instrument(span)
                    .with_subscriber(dispatch.clone())
                    .await
            }
            None => {
                let span = request_span(&parts, &request_id);
                self.respond(parts, request_id, span.clone()).instrument(span).await
            }
        }
    }

    async fn respond(&self, parts: Parts, request_id: String, span: Span) -> Response {
        tracing::info!("{} {}", parts.method, parts.uri);

        let result = match self.registry.resolve(&parts.method, parts.uri.path()) {
            Resolution::Matched { index, params } => match self.handlers.get(index) {
                Some(handler) => {
                    let urls = UrlBuilder::new(
                        self.registry.clone(),
                        request::host(&parts),
                        ForwardedHeaders::from_headers(&parts.headers),
                    );
                    let ctx = RequestContext::new(params, parts, request_id, span, urls);
                    handler.call(ctx).await
                }
                None => Err(Error::RouteNotFound(format!("#{index}"))),
            },
            Resolution::MethodNotAllowed => Err(HttpError::method_not_allowed().into()),
            Resolution::NotFound => Err(HttpError::not_found().into()),
        };

        let response = match result {
            Ok(reply) => reply.into_response(),
            Err(err) => error_response(&err),
        };
        tracing::debug!(status = response.status().as_u16(), "Request handled");
        response
    }
}

fn request_span(parts: &Parts, request_id: &str) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %parts.method,
        uri = %parts.uri,
    )
}

fn error_response(err: &Error) -> Response {
    let classified = classify(err);
    if classified.status().is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status = classified.status().as_u16(), "Request rejected");
    }
    ErrorEnvelope::from(&classified).into_response()
}
