use derive_more::Display;
use entitykit_core::{
    config::ConfigError,
    error::{ErrorOrigin as CoreErrorOrigin, InternalError},
    query::QueryError,
    schema::SchemaError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// True when the caller misconfigured the registry or a model; these
    /// never heal on retry.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Schema(_) | ErrorKind::Config(_))
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(ErrorKind::Internal, err.origin.into(), err.message)
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        let kind = match err {
            SchemaError::MissingSchema { .. } => SchemaErrorKind::MissingSchema,
            SchemaError::AmbiguousSortKey { .. } => SchemaErrorKind::Ambiguous,
            SchemaError::DuplicateProperty { .. }
            | SchemaError::DuplicateEntityName { .. }
            | SchemaError::OverrideAfterBuild { .. }
            | SchemaError::DuplicateOverride { .. } => SchemaErrorKind::Conflict,
            SchemaError::InvalidName { .. } | SchemaError::Validation(_) => {
                SchemaErrorKind::Invalid
            }
        };

        Self::new(ErrorKind::Schema(kind), ErrorOrigin::Schema, err.to_string())
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Schema(err) => err.into(),

            QueryError::UnknownField { .. } => Self::new(
                ErrorKind::Query(QueryErrorKind::UnknownField),
                ErrorOrigin::Query,
                err.to_string(),
            ),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ConfigErrorKind::Io,
            ConfigError::Parse(_) | ConfigError::Invalid(_) => ConfigErrorKind::Invalid,
        };

        Self::new(ErrorKind::Config(kind), ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Schema(SchemaErrorKind),
    Query(QueryErrorKind),
    Config(ConfigErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

///
/// SchemaErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SchemaErrorKind {
    /// Model declares no property table and no override exists.
    MissingSchema,

    /// Two properties share one identity path.
    Ambiguous,

    /// Duplicate names or a late override.
    Conflict,

    /// Malformed names or broken relationships.
    Invalid,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Predicate references a field the entity does not store.
    UnknownField,
}

///
/// ConfigErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConfigErrorKind {
    Io,
    Invalid,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Schema,
    Query,
    Config,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Schema => Self::Schema,
            CoreErrorOrigin::Query => Self::Query,
            CoreErrorOrigin::Config => Self::Config,
        }
    }
}
