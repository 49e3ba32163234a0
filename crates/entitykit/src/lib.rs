//! ## Crate layout
//! - `core`: runtime model descriptors, schema registry, predicates, and
//!   fetch-specification builders.
//! - `error`: stable public error taxonomy.
//!
//! The `prelude` module mirrors the surface used by application code that
//! declares models and builds fetches.

pub use entitykit_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use entitykit_core::{
    config::{AmbiguityPolicy, RegistryConfig},
    query::{base_fetch, fetch},
    schema::SchemaRegistry,
};
pub use error::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        model::{
            entity::EntityDescriptor,
            path::PropertyPath,
            property::{Cardinality, PropertyDescriptor, RelationshipKind, StoredType},
        },
        query::{
            FetchBuilder, FetchSpecification, FieldRef, OrderDirection, Predicate, SortKey,
            base_fetch, fetch,
        },
        schema::SchemaRegistry,
        traits::{FetchExecutor, FieldValue as _, Path, PersistentModel},
        value::Value,
    };
    pub use crate::Error;
}
