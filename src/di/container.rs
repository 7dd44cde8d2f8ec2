use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;

use crate::dispatch::Controller;
use crate::error::{PorticoError, Result};
use crate::middleware::RequestHandler;

/// A controller instance bound into the container under a name.
///
/// The class `TypeId` keys the metadata store; the name is what route
/// handlers use for the per-request lookup, so two instances of the same
/// class can be bound under different names.
#[derive(Clone)]
pub struct ControllerBinding {
    name: String,
    class: TypeId,
    instance: Arc<dyn Controller>,
}

impl ControllerBinding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> TypeId {
        self.class
    }

    pub fn instance(&self) -> Arc<dyn Controller> {
        Arc::clone(&self.instance)
    }
}

/// Thread-safe dependency injection container.
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
    handlers: DashMap<String, Arc<dyn RequestHandler>>,
    controllers: Vec<ControllerBinding>,
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            handlers: self.handlers.clone(),
            controllers: self.controllers.clone(),
        }
    }
}

#[derive(Clone)]
struct ServiceEntry {
    instance: Arc<dyn Any + Send + Sync>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
            handlers: DashMap::new(),
            controllers: Vec::new(),
        }
    }

    /// Register a service instance, keyed by its type.
    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        let entry = ServiceEntry {
            instance: Arc::new(instance),
        };
        self.services.insert(TypeId::of::<T>(), entry);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self.services.get(&TypeId::of::<T>()).ok_or_else(|| {
            PorticoError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            }
        })?;
        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| PorticoError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    /// Register a request handler under a middleware identifier.
    pub fn register_handler(
        &mut self,
        id: impl Into<String>,
        handler: impl RequestHandler + 'static,
    ) -> &mut Self {
        self.register_handler_arc(id, Arc::new(handler))
    }

    pub fn register_handler_arc(
        &mut self,
        id: impl Into<String>,
        handler: Arc<dyn RequestHandler>,
    ) -> &mut Self {
        self.handlers.insert(id.into(), handler);
        self
    }

    /// Look up a request handler by middleware identifier.
    pub fn handler(&self, id: &str) -> Result<Arc<dyn RequestHandler>> {
        self.handlers
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PorticoError::HandlerNotFound { id: id.to_string() })
    }

    /// Bind a controller under its short type name.
    pub fn bind_controller<T: Controller + 'static>(&mut self, instance: T) -> &mut Self {
        self.bind_controller_named(short_type_name::<T>(), instance)
    }

    /// Bind a controller under an explicit name, allowing multiple instances
    /// of the same class to coexist.
    pub fn bind_controller_named<T: Controller + 'static>(
        &mut self,
        name: impl Into<String>,
        instance: T,
    ) -> &mut Self {
        self.controllers.push(ControllerBinding {
            name: name.into(),
            class: TypeId::of::<T>(),
            instance: Arc::new(instance),
        });
        self
    }

    /// Controller bindings, in registration order.
    pub fn controllers(&self) -> &[ControllerBinding] {
        &self.controllers
    }

    /// Named controller lookup, performed once per request by route handlers.
    /// An `Arc` clone over an immutable binding list, so per-request
    /// re-resolution stays cheap and idempotent.
    pub fn controller_named(&self, name: &str) -> Result<Arc<dyn Controller>> {
        self.controllers
            .iter()
            .find(|binding| binding.name == name)
            .map(ControllerBinding::instance)
            .ok_or_else(|| PorticoError::ControllerNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}
