use std::sync::Arc;

use crate::di::Container;
use crate::error::Result;
use crate::metadata::MetadataStore;
use crate::routing::RouteCompiler;

use super::Server;

/// Server construction options.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Path prefix applied to every controller before per-method path
    /// composition.
    pub default_root: Option<String>,
}

type ConfigFn = Box<dyn FnOnce(&mut Server) + Send>;

/// Wires a container's controllers onto a server.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use portico::{Container, MetadataStore, PorticoServer};
///
/// # fn demo(container: Arc<Container>, store: Arc<MetadataStore>) -> portico::Result<()> {
/// let server = PorticoServer::new(container, store)
///     .set_config(|server| {
///         // server-level setup runs before any route is registered
///         let _ = server;
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct PorticoServer {
    container: Arc<Container>,
    store: Arc<MetadataStore>,
    options: ServerOptions,
    config_fn: Option<ConfigFn>,
}

impl PorticoServer {
    pub fn new(container: Arc<Container>, store: Arc<MetadataStore>) -> Self {
        Self::with_options(container, store, ServerOptions::default())
    }

    pub fn with_options(
        container: Arc<Container>,
        store: Arc<MetadataStore>,
        options: ServerOptions,
    ) -> Self {
        Self {
            container,
            store,
            options,
            config_fn: None,
        }
    }

    /// Set the configuration callback applied to the server before any route
    /// is registered. Chainable; not executed until [`PorticoServer::build`].
    pub fn set_config<F>(mut self, config: F) -> Self
    where
        F: FnOnce(&mut Server) + Send + 'static,
    {
        self.config_fn = Some(Box::new(config));
        self
    }

    /// Apply the configuration callback, compile every controller the
    /// container knows about, register the compiled routes, and return the
    /// server.
    ///
    /// The callback runs first so server-level state exists before routes
    /// are registered. Without a configured callback the server is built
    /// as-is: no listening defaults are assumed, since serving happens via
    /// [`Server::into_router`]. `build` consumes the facade; compiling the
    /// same container and store again through a fresh facade yields an
    /// identical route table.
    pub fn build(mut self) -> Result<Server> {
        let mut server = Server::new(Arc::clone(&self.container));
        if let Some(config) = self.config_fn.take() {
            config(&mut server);
        }

        let routes = RouteCompiler::new(&self.container, &self.store)
            .default_root(self.options.default_root.clone())
            .compile()?;
        for descriptor in routes {
            server.route(descriptor);
        }
        Ok(server)
    }
}
