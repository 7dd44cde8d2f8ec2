//! # Portico
//!
//! Declarative controller routing with dependency injection for axum-style
//! servers.
//!
//! Controllers are plain types bound into a [`Container`] and described by
//! routing metadata in an explicit [`MetadataStore`]. At build time the
//! route compiler merges controller-level and method-level metadata (path
//! prefixes, middleware chains) into final route descriptors and registers
//! them on a [`Server`]; at request time a generic handler resolves the
//! owning controller by name from the container, invokes the target method,
//! and normalizes whatever comes back (a value, a pending future, or an
//! error) into a wire reply.
//!
//! ## Features
//!
//! - **Dependency Injection**: controllers and middleware resolved from a
//!   thread-safe container; instances re-resolved by name per request
//! - **Declarative Routing**: controller base paths, per-method verbs and
//!   paths (literal or regex pattern), composed deterministically
//! - **Middleware Chains**: controller middleware then method middleware,
//!   referenced directly or by container identifier with per-entry fallback
//! - **Uniform Error Shape**: structured [`HttpError`] values become wire
//!   replies with matching status code, message, and `{code, message}` body
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use axum::body::Body;
//! use http::Request;
//! use portico::{
//!     Container, Controller, ControllerMetadata, Invocation, MetadataStore, MethodMetadata,
//!     PorticoServer, ReplyValue,
//! };
//!
//! // 1. Define a controller: dispatch on the method key each route registers
//! struct HealthController;
//!
//! impl Controller for HealthController {
//!     fn invoke(&self, key: &str, _request: Request<Body>) -> Invocation {
//!         match key {
//!             "check" => Invocation::pending(async {
//!                 Ok(Some(ReplyValue::Body(serde_json::json!({ "ok": true }))))
//!             }),
//!             _ => Invocation::Absent,
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // 2. Bind it into the container
//!     let mut container = Container::new();
//!     container.bind_controller(HealthController);
//!
//!     // 3. Register its routing metadata
//!     let store = MetadataStore::new();
//!     store.register_controller::<HealthController>(ControllerMetadata::new("/health"));
//!     store.register_route::<HealthController>(MethodMetadata::get("/", "check"));
//!
//!     // 4. Build and serve
//!     let server = PorticoServer::new(Arc::new(container), Arc::new(store))
//!         .build()
//!         .expect("route compilation failed");
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     axum::serve(listener, server.into_router()).await.unwrap();
//! }
//! ```

pub mod di;
pub mod dispatch;
pub mod error;
pub mod exception;
pub mod metadata;
pub mod middleware;
pub mod reply;
pub mod routing;
pub mod server;

// Re-export core types
pub use di::{Container, ContainerBuilder, ControllerBinding, Injectable};
pub use dispatch::{Controller, DispatchError, DispatchResult, Invocation, RouteHandlerFn};
pub use error::{PorticoError, Result};
pub use exception::HttpError;
pub use metadata::{
    ControllerMetadata, MetadataStore, MethodMetadata, RouteConfig, RouteOptions, RoutePath,
    RouteSpec,
};
pub use middleware::{Middleware, RequestHandler};
pub use reply::{ReplyValue, WireReply};
pub use routing::{RouteCompiler, RouteDescriptor};
pub use server::{PorticoServer, Server, ServerOptions, ServerService};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use portico::prelude::*;
/// ```
pub mod prelude {
    pub use crate::di::{Container, ContainerBuilder, ControllerBinding, Injectable};
    pub use crate::dispatch::{
        Controller, DispatchError, DispatchResult, Invocation, RouteHandlerFn,
    };
    pub use crate::error::{PorticoError, Result};
    pub use crate::exception::HttpError;
    pub use crate::metadata::{
        ControllerMetadata, MetadataStore, MethodMetadata, RouteConfig, RouteOptions, RoutePath,
        RouteSpec,
    };
    pub use crate::middleware::{Middleware, RequestHandler, from_fn, resolve_middleware};
    pub use crate::reply::{ReplyValue, WireReply, send};
    pub use crate::routing::{RouteCompiler, RouteDescriptor};
    pub use crate::server::{PorticoServer, Server, ServerOptions, ServerService};
    pub use async_trait::async_trait;
    pub use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
