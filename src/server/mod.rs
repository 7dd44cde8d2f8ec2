//! The built server: a route table plus the request dispatch loop, mountable
//! on an axum router.

mod facade;

pub use facade::{PorticoServer, ServerOptions};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Router;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::Request;
use tower::Service;

use crate::di::Container;
use crate::exception::HttpError;
use crate::metadata::RoutePath;
use crate::middleware::Middleware;
use crate::reply::{self, ReplyValue};

use crate::routing::RouteDescriptor;

/// The server produced by [`PorticoServer::build`].
///
/// Holds the registered route table and dispatches requests: find the
/// matching route, run its pre-middleware chain, run the handler, answer.
/// Listening is the caller's job, typically via [`Server::into_router`] and
/// `axum::serve`.
pub struct Server {
    container: Arc<Container>,
    routes: Vec<RouteDescriptor>,
}

impl Server {
    pub(crate) fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            routes: Vec::new(),
        }
    }

    /// Register a compiled route. Duplicates are kept as-is; earlier routes
    /// win at match time.
    pub fn route(&mut self, descriptor: RouteDescriptor) -> &mut Self {
        self.routes.push(descriptor);
        self
    }

    /// The registered route table, in registration order.
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Dispatch one request against the route table.
    ///
    /// Unmatched requests are answered with a 404 structured error. A route
    /// whose handler deliberately produces no reply is answered with the
    /// server default, an empty 200.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let Some(route) = self
            .routes
            .iter()
            .find(|route| route.method == method && path_matches(&route.path, &path))
        else {
            return reply::send(ReplyValue::Error(HttpError::not_found())).into_response();
        };

        let mut request = request;
        for step in &route.middleware {
            let handler = match step {
                Middleware::Direct(handler) => Arc::clone(handler),
                // one late lookup for identifiers that were unknown at build time
                Middleware::Injectable(id) => match self.container.handler(id) {
                    Ok(handler) => handler,
                    Err(err) => {
                        tracing::error!(id = %id, %err, "middleware unresolved at request time");
                        return reply::send(ReplyValue::Error(
                            HttpError::internal_error()
                                .with_message(format!("unresolved middleware '{id}'")),
                        ))
                        .into_response();
                    }
                },
            };
            request = match handler.handle(request).await {
                Ok(request) => request,
                Err(halt) => return halt.into_response(),
            };
        }

        match (route.handler)(request).await {
            Some(wire) => wire.into_response(),
            None => Response::new(Body::empty()),
        }
    }

    /// Wrap the server as a `tower::Service`.
    pub fn into_service(self) -> ServerService {
        ServerService {
            inner: Arc::new(self),
        }
    }

    /// Mount the server as the fallback service of a fresh axum router.
    pub fn into_router(self) -> Router {
        Router::new().fallback_service(self.into_service())
    }
}

fn path_matches(route: &RoutePath, path: &str) -> bool {
    match route {
        RoutePath::Literal(literal) => literal_matches(literal, path),
        RoutePath::Pattern(pattern) => pattern.is_match(path),
    }
}

/// Segment-wise literal match; `{name}` segments match any single non-empty
/// segment. Trailing slashes are not significant.
fn literal_matches(literal: &str, path: &str) -> bool {
    let mut want = literal.trim_end_matches('/').split('/');
    let mut got = path.trim_end_matches('/').split('/');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if expected.starts_with('{') && expected.ends_with('}') {
                    if actual.is_empty() {
                        return false;
                    }
                } else if expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// `tower::Service` adapter so the server can be mounted on an axum router.
#[derive(Clone)]
pub struct ServerService {
    inner: Arc<Server>,
}

impl Service<Request<Body>> for ServerService {
    type Response = Response;
    type Error = std::convert::Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let server = Arc::clone(&self.inner);
        Box::pin(async move { Ok(server.dispatch(request).await) })
    }
}
