use crate::{
    error::InternalError,
    model::{entity::EntityDescriptor, path::PropertyPath},
    obs::MetricsEvent,
    query::{
        fetch::{FetchSpecification, OrderDirection, SortKey, SortKeySource},
        predicate::Predicate,
    },
    schema::{SchemaError, SchemaRegistry},
    traits::PersistentModel,
};
use std::{marker::PhantomData, sync::Arc};
use thiserror::Error as ThisError;

///
/// QueryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("entity '{entity}': predicate references unknown field '{field}'")]
    UnknownField { entity: &'static str, field: String },
}

impl From<QueryError> for InternalError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Schema(err) => err.into(),
            QueryError::UnknownField { .. } => Self::query_unsupported(err.to_string()),
        }
    }
}

///
/// FetchBuilder
///
/// Typed, declarative builder for one model's fetch specification.
///
/// Collects predicate, ordering, and bounds; `build` consults the registry
/// once for the canonical name and property metadata and resolves every
/// sort path. Sort paths are typed to `M`, so ordering by another model's
/// property does not compile.
///

pub struct FetchBuilder<'r, M: PersistentModel> {
    registry: &'r SchemaRegistry,
    predicate: Option<Predicate>,
    order: Vec<(&'static str, OrderDirection)>,
    offset: Option<u32>,
    limit: Option<u32>,
    _marker: PhantomData<fn() -> M>,
}

impl<'r, M: PersistentModel> FetchBuilder<'r, M> {
    /// Create an empty builder bound to `registry`.
    #[must_use]
    pub const fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            predicate: None,
            order: Vec::new(),
            offset: None,
            limit: None,
            _marker: PhantomData,
        }
    }

    /// Add a predicate, implicitly AND-ing with any existing predicate.
    #[must_use]
    pub fn filter(self, predicate: Predicate) -> Self {
        self.and(predicate)
    }

    /// Explicit AND combinator for predicates.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Predicate::And(vec![existing, predicate])),
            None => Some(predicate),
        };
        self
    }

    /// Explicit OR combinator for predicates.
    #[must_use]
    pub fn or(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Predicate::Or(vec![existing, predicate])),
            None => Some(predicate),
        };
        self
    }

    /// Append a sort key with an explicit direction.
    #[must_use]
    pub fn sort_by<T>(mut self, path: PropertyPath<M, T>, direction: OrderDirection) -> Self {
        self.order.push((path.raw(), direction));
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by<T>(self, path: PropertyPath<M, T>) -> Self {
        self.sort_by(path, OrderDirection::Asc)
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc<T>(self, path: PropertyPath<M, T>) -> Self {
        self.sort_by(path, OrderDirection::Desc)
    }

    /// Set or replace the result offset.
    #[must_use]
    pub const fn offset(mut self, n: u32) -> Self {
        self.offset = Some(n);
        self
    }

    /// Set or replace the result limit.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Resolve against the registry and produce the fetch specification.
    pub fn build(self) -> Result<FetchSpecification, QueryError> {
        let descriptor = self.registry.entity_descriptor::<M>()?;

        if self.registry.config().strict_predicate_fields
            && let Some(predicate) = &self.predicate
        {
            check_fields(self.registry, &descriptor, predicate)?;
        }

        let sort_keys: Vec<SortKey> = self
            .order
            .iter()
            .map(|(raw, direction)| resolve_sort_key(&descriptor, raw, *direction))
            .collect();

        let structural = sort_keys
            .iter()
            .filter(|key| key.source == SortKeySource::Structural)
            .count() as u64;
        self.registry.record(MetricsEvent::FetchBuilt {
            entity_path: M::PATH,
            schema_sort_keys: sort_keys.len() as u64 - structural,
            structural_sort_keys: structural,
        });

        let spec = FetchSpecification {
            entity_name: descriptor.canonical_name(),
            predicate: self.predicate,
            sort_keys,
            offset: self.offset,
            limit: self.limit,
        };
        tracing::trace!(entity = M::PATH, spec = %spec, "fetch specification built");

        Ok(spec)
    }
}

/// Unfiltered, unordered, unbounded fetch for `M`.
pub fn base_fetch<M: PersistentModel>(
    registry: &SchemaRegistry,
) -> Result<FetchSpecification, QueryError> {
    FetchBuilder::<M>::new(registry).build()
}

/// Fetch for `M` with an optional filter, exactly one sort key, and
/// optional bounds.
///
/// The filter is passed through unchanged. The sort path resolves to the
/// stored name of the property declaring it, or to the raw path itself when
/// no property does.
pub fn fetch<M: PersistentModel, T>(
    registry: &SchemaRegistry,
    filter: Option<Predicate>,
    sort_by: PropertyPath<M, T>,
    direction: OrderDirection,
    offset: Option<u32>,
    limit: Option<u32>,
) -> Result<FetchSpecification, QueryError> {
    let mut builder = FetchBuilder::<M>::new(registry).sort_by(sort_by, direction);
    builder.predicate = filter;
    builder.offset = offset;
    builder.limit = limit;

    builder.build()
}

// Identity-path equality against the declared properties; first
// declaration wins when the registry tolerates duplicates.
pub(crate) fn resolve_sort_key(
    descriptor: &EntityDescriptor,
    raw_path: &str,
    direction: OrderDirection,
) -> SortKey {
    if let Some(property) = descriptor.property_by_path(raw_path) {
        return SortKey {
            field: property.name.to_string(),
            direction,
            source: SortKeySource::Schema,
        };
    }

    tracing::debug!(
        entity = descriptor.canonical_name(),
        path = raw_path,
        "no property declares sort path; using structural sort key"
    );

    SortKey {
        field: raw_path.to_string(),
        direction,
        source: SortKeySource::Structural,
    }
}

// Every referenced field must be a stored property; dotted segments must
// walk through relationships into published target entities.
fn check_fields(
    registry: &SchemaRegistry,
    root: &Arc<EntityDescriptor>,
    predicate: &Predicate,
) -> Result<(), QueryError> {
    let unknown = |field: &str| QueryError::UnknownField {
        entity: root.canonical_name(),
        field: field.to_string(),
    };

    for field in predicate.fields() {
        let mut current = Arc::clone(root);
        let mut segments = field.split('.').peekable();

        while let Some(segment) = segments.next() {
            let property = current.property(segment).ok_or_else(|| unknown(field))?;
            if segments.peek().is_none() {
                break;
            }

            let rel = property.relationship().ok_or_else(|| unknown(field))?;
            current = registry
                .descriptor_by_name(rel.target)
                .ok_or_else(|| unknown(field))?;
        }
    }

    Ok(())
}
