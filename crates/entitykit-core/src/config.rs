//! Registry configuration.
//!
//! Configuration is plain data: it is read once when a `SchemaRegistry` is
//! constructed and never consulted again after that.

use crate::{
    MAX_ENTITY_NAME_LEN, MAX_PROPERTY_NAME_LEN,
    error::{ErrorClass, InternalError},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid registry config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Io { .. } => ErrorClass::Internal,
            Self::Parse(_) | Self::Invalid(_) => ErrorClass::Unsupported,
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        match err.class() {
            ErrorClass::Internal => Self::config_internal(err.to_string()),
            _ => Self::config_unsupported(err.to_string()),
        }
    }
}

///
/// AmbiguityPolicy
///
/// How the registry treats two properties that declare the same identity
/// path. `Reject` fails descriptor construction; `FirstMatch` keeps both and
/// sort-key resolution takes the first in declaration order.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    #[default]
    Reject,
    FirstMatch,
}

///
/// RegistryConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Handling of duplicate identity paths within one entity.
    pub ambiguity: AmbiguityPolicy,

    /// Upper bound on canonical entity name length.
    pub max_entity_name_len: usize,

    /// Upper bound on stored property name length.
    pub max_property_name_len: usize,

    /// Reject predicates that reference fields the entity does not declare.
    pub strict_predicate_fields: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::Reject,
            max_entity_name_len: MAX_ENTITY_NAME_LEN,
            max_property_name_len: MAX_PROPERTY_NAME_LEN,
            strict_predicate_fields: false,
        }
    }
}

impl RegistryConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entity_name_len == 0 {
            return Err(ConfigError::Invalid(
                "max_entity_name_len must be greater than zero".to_string(),
            ));
        }
        if self.max_property_name_len == 0 {
            return Err(ConfigError::Invalid(
                "max_property_name_len must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorOrigin;

    #[test]
    fn empty_document_yields_defaults() {
        let config = RegistryConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.ambiguity, AmbiguityPolicy::Reject);
        assert!(!config.strict_predicate_fields);
    }

    #[test]
    fn explicit_keys_override_defaults() {
        let config = RegistryConfig::from_toml_str(
            r#"
            ambiguity = "first_match"
            max_entity_name_len = 32
            strict_predicate_fields = true
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.ambiguity, AmbiguityPolicy::FirstMatch);
        assert_eq!(config.max_entity_name_len, 32);
        assert_eq!(config.max_property_name_len, MAX_PROPERTY_NAME_LEN);
        assert!(config.strict_predicate_fields);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RegistryConfig::from_toml_str("cache_size = 10")
            .expect_err("unknown keys should fail");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_length_limits_are_rejected() {
        let err = RegistryConfig::from_toml_str("max_property_name_len = 0")
            .expect_err("zero limit should fail");

        let internal = InternalError::from(err);
        assert_eq!(internal.class, ErrorClass::Unsupported);
        assert_eq!(internal.origin, ErrorOrigin::Config);
        assert!(internal.message.contains("max_property_name_len"));
    }

    #[test]
    fn missing_file_maps_to_internal_error() {
        let err = RegistryConfig::from_path("/nonexistent/entitykit/registry.toml")
            .expect_err("missing file should fail");

        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(InternalError::from(err).class, ErrorClass::Internal);
    }
}
