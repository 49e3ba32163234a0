use derive_more::Display;
use serde::Serialize;

///
/// PropertyDescriptor
///
/// One declared persistent field of a model. Immutable once created and
/// usually declared inside a `static` table.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Stored name, as known to the persistence engine.
    pub name: &'static str,

    /// Raw identity path carried by the matching `PropertyPath`.
    pub identity_path: &'static str,

    /// Semantic type tag.
    pub stored_type: StoredType,

    /// Renaming identifier (pre-rename stored name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<&'static str>,

    /// Version hash modifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_modifier: Option<&'static str>,
}

impl PropertyDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        identity_path: &'static str,
        stored_type: StoredType,
    ) -> Self {
        Self {
            name,
            identity_path,
            stored_type,
            original_name: None,
            hash_modifier: None,
        }
    }

    /// Property whose identity path equals its stored name.
    #[must_use]
    pub const fn named(name: &'static str, stored_type: StoredType) -> Self {
        Self::new(name, name, stored_type)
    }

    #[must_use]
    pub const fn with_original_name(mut self, original_name: &'static str) -> Self {
        self.original_name = Some(original_name);
        self
    }

    #[must_use]
    pub const fn with_hash_modifier(mut self, hash_modifier: &'static str) -> Self {
        self.hash_modifier = Some(hash_modifier);
        self
    }

    #[must_use]
    pub const fn is_relationship(&self) -> bool {
        matches!(self.stored_type, StoredType::Relationship(_))
    }

    #[must_use]
    pub const fn relationship(&self) -> Option<&RelationshipKind> {
        match &self.stored_type {
            StoredType::Relationship(kind) => Some(kind),
            _ => None,
        }
    }

    /// Predicate builder over this property's stored name.
    #[must_use]
    pub const fn field(&self) -> crate::query::FieldRef {
        crate::query::FieldRef::new(self.name)
    }
}

///
/// StoredType
///
/// Semantic type tag for a stored property. Tags are part of the entity
/// version hash and must never be renumbered.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum StoredType {
    Bool,
    Int,
    Uint,
    Float,
    Decimal,
    Text,
    Blob,
    Date,
    Timestamp,
    Ulid,
    Uri,
    Transformable,
    #[display("Relationship({_0})")]
    Relationship(RelationshipKind),
}

impl StoredType {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Bool => 0x01,
            Self::Int => 0x02,
            Self::Uint => 0x03,
            Self::Float => 0x04,
            Self::Decimal => 0x05,
            Self::Text => 0x06,
            Self::Blob => 0x07,
            Self::Date => 0x08,
            Self::Timestamp => 0x09,
            Self::Ulid => 0x0a,
            Self::Uri => 0x0b,
            Self::Transformable => 0x0c,
            Self::Relationship(_) => 0x20,
        }
    }

    #[must_use]
    pub const fn to_one(target: &'static str) -> Self {
        Self::Relationship(RelationshipKind::new(target, Cardinality::One))
    }

    #[must_use]
    pub const fn to_many(target: &'static str) -> Self {
        Self::Relationship(RelationshipKind::new(target, Cardinality::Many))
    }
}

///
/// RelationshipKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[display("{target}:{cardinality}")]
pub struct RelationshipKind {
    /// Canonical name of the destination entity.
    pub target: &'static str,
    pub cardinality: Cardinality,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<&'static str>,
}

impl RelationshipKind {
    #[must_use]
    pub const fn new(target: &'static str, cardinality: Cardinality) -> Self {
        Self {
            target,
            cardinality,
            inverse: None,
        }
    }

    #[must_use]
    pub const fn with_inverse(mut self, inverse: &'static str) -> Self {
        self.inverse = Some(inverse);
        self
    }

    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self.cardinality, Cardinality::Many)
    }
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

impl Cardinality {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::One => 0x01,
            Self::Opt => 0x02,
            Self::Many => 0x03,
        }
    }
}
