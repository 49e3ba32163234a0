use crate::{
    config::RegistryConfig,
    model::{entity::EntityDescriptor, property::PropertyDescriptor},
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    schema::SchemaError,
    traits::PersistentModel,
};
use std::{
    any::TypeId,
    collections::{BTreeMap, HashMap},
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

// One publication slot per model type. Set at most once, under the
// `by_name` write lock, and never cleared. Lock order: `by_name`, then
// `overrides`, then `slots`.
type Slot = OnceLock<Arc<EntityDescriptor>>;

///
/// SchemaRegistry
///
/// Explicit registry of entity descriptors, keyed by model type.
///
/// Lifecycle: construct once at process start, optionally register
/// overrides and eagerly `register` every model, then share it (it is
/// `Send + Sync`) and read from it for the rest of the process. Descriptors
/// are built lazily on first request, published exactly once per type, and
/// never invalidated.
///
/// Concurrent first requests for the same type may each build a candidate,
/// but only one candidate is published and every caller receives that
/// instance.
///

pub struct SchemaRegistry {
    config: RegistryConfig,
    sink: Arc<dyn MetricsSink>,
    slots: RwLock<HashMap<TypeId, Arc<Slot>>>,
    overrides: RwLock<HashMap<TypeId, Arc<[PropertyDescriptor]>>>,
    by_name: RwLock<BTreeMap<&'static str, Arc<EntityDescriptor>>>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("config", &self.config)
            .field("entities", &read(&self.by_name).keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl SchemaRegistry {
    /// Create an empty registry with the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with an explicit config.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            sink: Arc::new(GlobalMetricsSink),
            slots: RwLock::new(HashMap::new()),
            overrides: RwLock::new(HashMap::new()),
            by_name: RwLock::new(BTreeMap::new()),
        }
    }

    /// Route this registry's metrics events to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Build and publish the descriptor for `M` now, surfacing schema
    /// problems at configuration time.
    pub fn register<M: PersistentModel>(&self) -> Result<Arc<EntityDescriptor>, SchemaError> {
        self.entity_descriptor::<M>()
    }

    /// Supply the property table for a model that declares none, or replace
    /// the declared one. Must happen before the first descriptor request
    /// for `M`.
    pub fn register_override<M: PersistentModel>(
        &self,
        properties: Vec<PropertyDescriptor>,
    ) -> Result<(), SchemaError> {
        let key = TypeId::of::<M>();

        // Serialized with `publish`: either the slot is already set and the
        // override is rejected, or the publishing build sees it.
        let _publication = write(&self.by_name);
        let mut overrides = write(&self.overrides);

        if read(&self.slots)
            .get(&key)
            .is_some_and(|slot| slot.get().is_some())
        {
            return Err(SchemaError::OverrideAfterBuild { path: M::PATH });
        }
        if overrides.contains_key(&key) {
            return Err(SchemaError::DuplicateOverride { path: M::PATH });
        }

        tracing::debug!(
            entity = M::PATH,
            properties = properties.len(),
            "schema override registered"
        );
        overrides.insert(key, properties.into());

        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Return the cached descriptor for `M`, building it on first request.
    pub fn entity_descriptor<M: PersistentModel>(
        &self,
    ) -> Result<Arc<EntityDescriptor>, SchemaError> {
        let slot = self.slot::<M>();

        if let Some(descriptor) = slot.get() {
            tracing::trace!(entity = M::PATH, "descriptor cache hit");
            self.record(MetricsEvent::DescriptorCacheHit {
                entity_path: M::PATH,
            });

            return Ok(Arc::clone(descriptor));
        }

        let (descriptor, overridden) = self.build::<M>()?;
        self.publish::<M>(&slot, descriptor, overridden)
    }

    /// Look up one property of `M` by stored name.
    pub fn property<M: PersistentModel>(
        &self,
        name: &str,
    ) -> Result<Option<PropertyDescriptor>, SchemaError> {
        Ok(self.entity_descriptor::<M>()?.property(name).copied())
    }

    /// Look up a published descriptor by canonical entity name.
    #[must_use]
    pub fn descriptor_by_name(&self, name: &str) -> Option<Arc<EntityDescriptor>> {
        read(&self.by_name).get(name).cloned()
    }

    /// All published descriptors, ordered by canonical name.
    #[must_use]
    pub fn descriptors(&self) -> Vec<Arc<EntityDescriptor>> {
        read(&self.by_name).values().cloned().collect()
    }

    /// Check that every relationship targets a published entity and that
    /// declared inverses point back at the declaring entity.
    pub fn validate_relations(&self) -> Result<(), SchemaError> {
        let by_name = read(&self.by_name);
        let mut errors = Vec::new();

        for (name, descriptor) in by_name.iter() {
            for property in descriptor.relationships() {
                let Some(rel) = property.relationship() else {
                    continue;
                };

                let Some(target) = by_name.get(rel.target) else {
                    errors.push(format!(
                        "{name}.{}: target entity '{}' is not registered",
                        property.name, rel.target
                    ));
                    continue;
                };

                let Some(inverse) = rel.inverse else {
                    continue;
                };

                match target.property(inverse).and_then(|p| p.relationship()) {
                    Some(back) if back.target == *name => {}
                    Some(back) => errors.push(format!(
                        "{name}.{}: inverse '{}.{inverse}' targets '{}'",
                        property.name, rel.target, back.target
                    )),
                    None => errors.push(format!(
                        "{name}.{}: inverse '{}.{inverse}' is not a relationship",
                        property.name, rel.target
                    )),
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation(errors))
        }
    }

    pub(crate) fn record(&self, event: MetricsEvent) {
        self.sink.record(event);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn slot<M: PersistentModel>(&self) -> Arc<Slot> {
        let key = TypeId::of::<M>();
        if let Some(slot) = read(&self.slots).get(&key) {
            return Arc::clone(slot);
        }

        Arc::clone(write(&self.slots).entry(key).or_default())
    }

    // Also reports whether the candidate came from an override.
    fn build<M: PersistentModel>(&self) -> Result<(EntityDescriptor, bool), SchemaError> {
        let overridden = read(&self.overrides).get(&TypeId::of::<M>()).cloned();

        let Some(properties) = overridden.as_deref().or_else(|| M::schema_metadata()) else {
            tracing::debug!(entity = M::PATH, "model declares no schema metadata");
            self.record(MetricsEvent::MissingSchema {
                entity_path: M::PATH,
            });

            return Err(SchemaError::MissingSchema { path: M::PATH });
        };

        let descriptor = EntityDescriptor::from_model::<M>(properties, &self.config)?;

        Ok((descriptor, overridden.is_some()))
    }

    fn publish<M: PersistentModel>(
        &self,
        slot: &Slot,
        mut descriptor: EntityDescriptor,
        overridden: bool,
    ) -> Result<Arc<EntityDescriptor>, SchemaError> {
        let mut by_name = write(&self.by_name);

        // lost the race; drop our candidate
        if let Some(published) = slot.get() {
            return Ok(Arc::clone(published));
        }

        // an override landed while the candidate was being built
        if !overridden
            && let Some(properties) = read(&self.overrides).get(&TypeId::of::<M>()).cloned()
        {
            tracing::debug!(
                entity = M::PATH,
                "override registered during build; rebuilding candidate"
            );
            descriptor = EntityDescriptor::from_model::<M>(&properties, &self.config)?;
        }

        let name = descriptor.canonical_name();
        if let Some(other) = by_name.get(name) {
            return Err(SchemaError::DuplicateEntityName {
                name,
                first: other.type_path(),
                second: M::PATH,
            });
        }

        let descriptor = Arc::new(descriptor);
        by_name.insert(name, Arc::clone(&descriptor));
        let published = slot.get_or_init(|| descriptor);

        tracing::debug!(
            entity = M::PATH,
            canonical_name = name,
            properties = published.properties().len(),
            version_hash = %published.version_hash(),
            "entity descriptor published"
        );
        self.record(MetricsEvent::DescriptorBuilt {
            entity_path: M::PATH,
        });

        Ok(Arc::clone(published))
    }
}

// Registry maps are append-only, so a poisoned lock still guards
// consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
