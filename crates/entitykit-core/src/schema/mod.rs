//! Module: schema
//! Responsibility: per-model entity descriptors, built once and cached.
//! Does not own: fetch construction or predicate handling.
//! Boundary: the only place `PersistentModel` metadata is read.

mod error;
mod registry;
pub(crate) mod validate;


pub use error::SchemaError;
pub use registry::SchemaRegistry;
