//! Core runtime for entitykit: model descriptors, the schema registry,
//! predicates, and fetch-specification builders handed to an external
//! object-graph store.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod query;
pub mod schema;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Default maximum length for canonical entity names.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Default maximum length for stored property names.
pub const MAX_PROPERTY_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries internals, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            entity::EntityDescriptor,
            path::PropertyPath,
            property::{Cardinality, PropertyDescriptor, RelationshipKind, StoredType},
        },
        query::{
            FetchBuilder, FetchSpecification, FieldRef, OrderDirection, SortKey,
            predicate::{CompareOp, Predicate},
        },
        schema::SchemaRegistry,
        traits::{FieldValue as _, Path, PersistentModel},
        value::Value,
    };
}
