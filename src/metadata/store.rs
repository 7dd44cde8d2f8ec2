use std::any::TypeId;

use dashmap::DashMap;

use super::{ControllerMetadata, MethodMetadata};

/// Append-only store of routing metadata, keyed by controller type.
///
/// Populated while the application is wired up; read-only once the server is
/// built. Registering method metadata preserves declaration order, which is
/// the order routes are compiled in.
pub struct MetadataStore {
    controllers: DashMap<TypeId, ControllerMetadata>,
    methods: DashMap<TypeId, Vec<MethodMetadata>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self {
            controllers: DashMap::new(),
            methods: DashMap::new(),
        }
    }

    pub fn register_controller<T: 'static>(&self, metadata: ControllerMetadata) -> &Self {
        self.controllers.insert(TypeId::of::<T>(), metadata);
        self
    }

    pub fn register_route<T: 'static>(&self, metadata: MethodMetadata) -> &Self {
        self.methods
            .entry(TypeId::of::<T>())
            .or_insert_with(Vec::new)
            .push(metadata);
        self
    }

    pub fn register_routes<T: 'static>(
        &self,
        metadata: impl IntoIterator<Item = MethodMetadata>,
    ) -> &Self {
        self.methods
            .entry(TypeId::of::<T>())
            .or_insert_with(Vec::new)
            .extend(metadata);
        self
    }

    pub fn controller_metadata(&self, class: TypeId) -> Option<ControllerMetadata> {
        self.controllers.get(&class).map(|entry| entry.value().clone())
    }

    pub fn method_metadata(&self, class: TypeId) -> Option<Vec<MethodMetadata>> {
        self.methods.get(&class).map(|entry| entry.value().clone())
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}
