use std::sync::Arc;

use crate::di::Container;
use crate::dispatch::Controller;
use crate::middleware::RequestHandler;

/// Builder for constructing a dependency injection container.
///
/// # Example
/// ```
/// use portico::ContainerBuilder;
///
/// let container = ContainerBuilder::new()
///     .register(42i32)
///     .build();
/// assert_eq!(*container.resolve::<i32>().unwrap(), 42);
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Register a service instance.
    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    /// Register a request handler under a middleware identifier.
    pub fn register_handler(
        mut self,
        id: impl Into<String>,
        handler: impl RequestHandler + 'static,
    ) -> Self {
        self.container.register_handler(id, handler);
        self
    }

    pub fn register_handler_arc(
        mut self,
        id: impl Into<String>,
        handler: Arc<dyn RequestHandler>,
    ) -> Self {
        self.container.register_handler_arc(id, handler);
        self
    }

    /// Bind a controller under its short type name.
    pub fn bind_controller<T: Controller + 'static>(mut self, instance: T) -> Self {
        self.container.bind_controller(instance);
        self
    }

    /// Bind a controller under an explicit name.
    pub fn bind_controller_named<T: Controller + 'static>(
        mut self,
        name: impl Into<String>,
        instance: T,
    ) -> Self {
        self.container.bind_controller_named(name, instance);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
