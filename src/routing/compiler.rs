use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::di::Container;
use crate::dispatch::{self, RouteHandlerFn};
use crate::error::{PorticoError, Result};
use crate::metadata::{MetadataStore, RouteConfig, RoutePath};
use crate::middleware::{self, Middleware};
use crate::routing::path;

/// A compiled route, ready to hand to the server, which owns it afterwards.
#[derive(Clone)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path: RoutePath,
    /// Controller middleware first, then method middleware.
    pub middleware: Vec<Middleware>,
    /// Server-specific options, passed through untouched.
    pub config: RouteConfig,
    pub handler: RouteHandlerFn,
}

impl PartialEq for RouteDescriptor {
    /// Structural equality over everything but the handler closure.
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.path == other.path
            && self.middleware == other.middleware
            && self.config == other.config
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("middleware", &self.middleware)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Compiles controller metadata into route descriptors.
///
/// Controllers are processed in the order the container enumerates them,
/// methods in declaration order. A controller without both controller-level
/// and method-level metadata contributes no routes; that is not an error.
/// Descriptors are never merged or deduplicated. Compilation reads the
/// metadata store without writing to it, so repeated compilation over the
/// same container and store yields identical descriptor lists.
pub struct RouteCompiler<'a> {
    container: &'a Arc<Container>,
    store: &'a MetadataStore,
    default_root: Option<String>,
}

impl<'a> RouteCompiler<'a> {
    pub fn new(container: &'a Arc<Container>, store: &'a MetadataStore) -> Self {
        Self {
            container,
            store,
            default_root: None,
        }
    }

    /// Path prefix applied to every controller before per-method composition.
    pub fn default_root(mut self, root: Option<String>) -> Self {
        self.default_root = root;
        self
    }

    pub fn compile(&self) -> Result<Vec<RouteDescriptor>> {
        let mut routes = Vec::new();
        for binding in self.container.controllers() {
            let Some(controller_meta) = self.store.controller_metadata(binding.class()) else {
                continue;
            };
            let Some(method_meta) = self.store.method_metadata(binding.class()) else {
                continue;
            };

            let controller_path =
                path::apply_default_root(self.default_root.as_deref(), controller_meta.path);
            let controller_middleware =
                middleware::resolve_middleware(self.container, &controller_meta.middleware);

            for metadata in method_meta {
                let options = metadata.options.normalize();
                let route_middleware =
                    middleware::resolve_middleware(self.container, &metadata.middleware);
                let composed = path::compose(controller_path.as_deref(), options.path)?;
                let method = Method::from_bytes(metadata.method.to_uppercase().as_bytes())
                    .map_err(|_| PorticoError::InvalidMethod {
                        verb: metadata.method.clone(),
                    })?;
                let handler = dispatch::make_handler(
                    Arc::clone(self.container),
                    binding.name(),
                    metadata.key.as_str(),
                );

                let mut chain = controller_middleware.clone();
                chain.extend(route_middleware);

                tracing::debug!(
                    method = %method,
                    path = composed.source(),
                    controller = binding.name(),
                    key = %metadata.key,
                    "route compiled"
                );
                routes.push(RouteDescriptor {
                    method,
                    path: composed,
                    middleware: chain,
                    config: options.config,
                    handler,
                });
            }
        }
        Ok(routes)
    }
}
