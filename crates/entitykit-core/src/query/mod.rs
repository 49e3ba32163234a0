//! Module: query
//! Responsibility: fetch-specification construction and predicate vocabulary.
//! Does not own: descriptor construction or fetch execution.
//! Boundary: produces `FetchSpecification` values for the external store.

mod builder;
mod fetch;
mod field;
pub mod predicate;


pub use builder::{FetchBuilder, QueryError, base_fetch, fetch};
pub use fetch::{FetchSpecification, OrderDirection, SortKey, SortKeySource};
pub use field::FieldRef;
pub use predicate::{CompareOp, ComparePredicate, Predicate};
