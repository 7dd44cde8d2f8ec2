use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use http::Request;

use crate::di::Container;
use crate::exception::HttpError;
use crate::reply::{self, ReplyValue, WireReply};

/// Boxed future used throughout the dispatch path.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Error surfaced by a rejected asynchronous invocation.
pub type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a pending invocation.
///
/// `Ok(Some(value))` is a normal resolved value; `Ok(None)` is the explicit
/// no-value outcome, answered with 204; `Err` is a rejection, answered with a
/// 500 structured error carrying the rejection's message.
pub type DispatchResult = Result<Option<ReplyValue>, DispatchError>;

/// Outcome of invoking a controller method.
pub enum Invocation {
    /// The method produced nothing at all; no reply is emitted and the
    /// server's own default applies.
    Absent,
    /// An immediate value.
    Value(ReplyValue),
    /// An asynchronous result still pending when the method returned.
    Pending(BoxFuture<DispatchResult>),
}

impl Invocation {
    pub fn value(value: impl Into<ReplyValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = DispatchResult> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }
}

/// A class grouping related route handlers.
///
/// Controllers are bound into the container under a name and resolved by
/// that name on every request. `invoke` dispatches on the method key the
/// route was registered with; unknown keys should return
/// [`Invocation::Absent`].
pub trait Controller: Send + Sync {
    fn invoke(&self, key: &str, request: Request<Body>) -> Invocation;
}

/// The per-route handler installed on the server. `None` means the
/// controller method returned nothing and no reply is emitted.
pub type RouteHandlerFn =
    Arc<dyn Fn(Request<Body>) -> BoxFuture<Option<WireReply>> + Send + Sync>;

/// Build the handler for a (controller name, method key) pair.
///
/// The controller instance is re-resolved by name on every request rather
/// than cached, so request-scoped container bindings are honored. Exactly
/// one reply is produced per request, or none when the method itself
/// produced nothing.
pub fn make_handler(
    container: Arc<Container>,
    controller_name: impl Into<String>,
    key: impl Into<String>,
) -> RouteHandlerFn {
    let controller_name = controller_name.into();
    let key = key.into();
    Arc::new(move |request: Request<Body>| -> BoxFuture<Option<WireReply>> {
        let container = Arc::clone(&container);
        let controller_name = controller_name.clone();
        let key = key.clone();
        Box::pin(async move {
            let instance = match container.controller_named(&controller_name) {
                Ok(instance) => instance,
                Err(err) => {
                    tracing::error!(controller = %controller_name, %err, "controller lookup failed");
                    return Some(reply::send(ReplyValue::Error(
                        HttpError::internal_error().with_message(err.to_string()),
                    )));
                }
            };
            match instance.invoke(&key, request) {
                Invocation::Absent => None,
                Invocation::Value(value) => Some(reply::send(value)),
                Invocation::Pending(future) => match future.await {
                    Ok(Some(value)) => Some(reply::send(value)),
                    Ok(None) => Some(WireReply::no_content()),
                    Err(err) => {
                        tracing::warn!(
                            controller = %controller_name,
                            method = %key,
                            %err,
                            "handler rejected"
                        );
                        Some(reply::send(ReplyValue::Error(
                            HttpError::internal_error().with_message(err.to_string()),
                        )))
                    }
                },
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;

    struct EchoController;

    impl Controller for EchoController {
        fn invoke(&self, key: &str, _request: Request<Body>) -> Invocation {
            match key {
                "value" => Invocation::value(json!("hello")),
                "resolved" => Invocation::pending(async { Ok(Some(ReplyValue::Body(json!(7)))) }),
                "empty" => Invocation::pending(async { Ok(None) }),
                "boom" => Invocation::pending(async { Err("boom".into()) }),
                "deliberate" => Invocation::pending(async {
                    Ok(Some(ReplyValue::Error(HttpError::not_found())))
                }),
                _ => Invocation::Absent,
            }
        }
    }

    fn handler_for(key: &str) -> RouteHandlerFn {
        let mut container = Container::new();
        container.bind_controller(EchoController);
        make_handler(Arc::new(container), "EchoController", key)
    }

    async fn run(key: &str) -> Option<WireReply> {
        handler_for(key)(Request::new(Body::empty())).await
    }

    #[tokio::test]
    async fn immediate_value_is_normalized() {
        let reply = run("value").await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, Some(json!("hello")));
    }

    #[tokio::test]
    async fn resolved_value_is_normalized() {
        let reply = run("resolved").await.unwrap();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, Some(json!(7)));
    }

    #[tokio::test]
    async fn no_value_sentinel_answers_204() {
        let reply = run("empty").await.unwrap();
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        assert!(reply.body.is_none());
    }

    #[tokio::test]
    async fn rejection_answers_500_with_the_message() {
        let reply = run("boom").await.unwrap();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.status_message.as_deref(), Some("boom"));
        assert_eq!(reply.body, Some(json!({ "code": 500, "message": "boom" })));
    }

    #[tokio::test]
    async fn deliberate_structured_error_keeps_its_code() {
        let reply = run("deliberate").await.unwrap();
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.status_message.as_deref(), Some("Not found"));
    }

    #[tokio::test]
    async fn absent_outcome_emits_no_reply() {
        assert!(run("unrouted").await.is_none());
    }

    #[tokio::test]
    async fn unknown_controller_name_answers_500() {
        let container = Arc::new(Container::new());
        let handler = make_handler(container, "Ghost", "value");
        let reply = handler(Request::new(Body::empty())).await.unwrap();
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
