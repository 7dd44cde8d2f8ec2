use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use http::Request;

use crate::di::Container;
use crate::reply::WireReply;

/// A request-processing step run before a route handler.
///
/// `Ok` continues the chain with the (possibly modified) request; `Err`
/// short-circuits and the reply is sent as-is.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: Request<Body>) -> Result<Request<Body>, WireReply>;
}

/// A middleware reference: either an identifier resolved against the
/// container, or a handler used directly.
#[derive(Clone)]
pub enum Middleware {
    Injectable(String),
    Direct(Arc<dyn RequestHandler>),
}

impl Middleware {
    pub fn injectable(id: impl Into<String>) -> Self {
        Self::Injectable(id.into())
    }

    pub fn direct(handler: impl RequestHandler + 'static) -> Self {
        Self::Direct(Arc::new(handler))
    }
}

impl PartialEq for Middleware {
    /// Direct handlers compare by pointer identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Injectable(a), Self::Injectable(b)) => a == b,
            (Self::Direct(a), Self::Direct(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Injectable(id) => f.debug_tuple("Injectable").field(id).finish(),
            Self::Direct(_) => f.debug_tuple("Direct").field(&"..").finish(),
        }
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> RequestHandler for FnHandler<F>
where
    F: Fn(Request<Body>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Request<Body>, WireReply>> + Send + 'static,
{
    async fn handle(&self, request: Request<Body>) -> Result<Request<Body>, WireReply> {
        (self.0)(request).await
    }
}

/// Wrap an async closure as a directly usable middleware.
///
/// # Example
/// ```
/// use axum::body::Body;
/// use http::Request;
/// use portico::middleware::from_fn;
///
/// let mw = from_fn(|mut request: Request<Body>| async move {
///     request.headers_mut().insert("x-seen", "1".parse().unwrap());
///     Ok(request)
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Request<Body>, WireReply>> + Send + 'static,
{
    Middleware::Direct(Arc::new(FnHandler(f)))
}

/// Resolve middleware references against the container.
///
/// Identifiers found in the container are upgraded to direct handlers;
/// unknown identifiers are returned unchanged. Each entry degrades
/// independently, so resolution never aborts the list. Order is preserved.
pub fn resolve_middleware(container: &Container, refs: &[Middleware]) -> Vec<Middleware> {
    refs.iter()
        .map(|reference| match reference {
            Middleware::Injectable(id) => match container.handler(id) {
                Ok(handler) => Middleware::Direct(handler),
                Err(_) => {
                    tracing::debug!(id = %id, "middleware identifier not registered, keeping reference");
                    reference.clone()
                }
            },
            Middleware::Direct(_) => reference.clone(),
        })
        .collect()
}
