//! Runtime data model definitions.
//!
//! Models declare *what exists* as static property tables; the types here
//! are the runtime form the registry validates, caches, and hands to query
//! construction.

pub mod entity;
pub mod path;
pub mod property;
