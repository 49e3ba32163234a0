use crate::error::{ErrorClass, InternalError};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Configuration-time failures. None of these heal at runtime; callers
/// should fail fast instead of retrying.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("model '{path}' declares no schema metadata and no override is registered")]
    MissingSchema { path: &'static str },

    #[error(
        "entity '{entity}': identity path '{path}' is declared by both '{first}' and '{second}'"
    )]
    AmbiguousSortKey {
        entity: &'static str,
        path: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("entity '{entity}': duplicate property '{property}'")]
    DuplicateProperty {
        entity: &'static str,
        property: &'static str,
    },

    #[error("duplicate entity name '{name}' for '{first}' and '{second}'")]
    DuplicateEntityName {
        name: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("schema override for '{path}' rejected: descriptor already built")]
    OverrideAfterBuild { path: &'static str },

    #[error("schema override for '{path}' already registered")]
    DuplicateOverride { path: &'static str },

    #[error("schema validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl SchemaError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingSchema { .. } => ErrorClass::NotFound,
            Self::AmbiguousSortKey { .. }
            | Self::DuplicateProperty { .. }
            | Self::DuplicateEntityName { .. }
            | Self::OverrideAfterBuild { .. }
            | Self::DuplicateOverride { .. } => ErrorClass::Conflict,
            Self::InvalidName { .. } | Self::Validation(_) => ErrorClass::InvariantViolation,
        }
    }
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        match err.class() {
            ErrorClass::NotFound => Self::schema_not_found(err.to_string()),
            ErrorClass::Conflict => Self::schema_conflict(err.to_string()),
            _ => Self::schema_invariant(err.to_string()),
        }
    }
}
