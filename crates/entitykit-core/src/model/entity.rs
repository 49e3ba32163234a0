use crate::{
    config::{AmbiguityPolicy, RegistryConfig},
    model::property::PropertyDescriptor,
    schema::{SchemaError, validate},
    traits::PersistentModel,
};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};

///
/// EntityDescriptor
///
/// Canonical description of one model type as a store entity.
///
/// Built once per model type by the `SchemaRegistry` and shared behind an
/// `Arc`. There are no mutating methods; everything is fixed at
/// construction.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityDescriptor {
    canonical_name: &'static str,
    type_path: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    renaming_identifier: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    version_hash_modifier: Option<&'static str>,

    properties: Vec<PropertyDescriptor>,
    version_hash: VersionHash,
}

impl EntityDescriptor {
    /// Build and validate the descriptor for model `M` from its property table.
    pub fn from_model<M: PersistentModel>(
        properties: &[PropertyDescriptor],
        config: &RegistryConfig,
    ) -> Result<Self, SchemaError> {
        let canonical_name = M::canonical_name();

        validate::validate_entity_name(canonical_name, config.max_entity_name_len)?;
        validate_properties(canonical_name, properties, config)?;

        let version_hash = VersionHash::compute(canonical_name, M::HASH_MODIFIER, properties);

        Ok(Self {
            canonical_name,
            type_path: M::PATH,
            renaming_identifier: M::ORIGINAL_NAME,
            version_hash_modifier: M::HASH_MODIFIER,
            properties: properties.to_vec(),
            version_hash,
        })
    }

    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        self.canonical_name
    }

    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[must_use]
    pub const fn renaming_identifier(&self) -> Option<&'static str> {
        self.renaming_identifier
    }

    #[must_use]
    pub const fn version_hash_modifier(&self) -> Option<&'static str> {
        self.version_hash_modifier
    }

    #[must_use]
    pub const fn version_hash(&self) -> VersionHash {
        self.version_hash
    }

    /// All declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Look up a property by stored name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property by identity path; first declaration wins.
    #[must_use]
    pub fn property_by_path(&self, raw_path: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.identity_path == raw_path)
    }

    /// Non-relationship properties.
    pub fn attributes(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.is_relationship())
    }

    /// Relationship properties.
    pub fn relationships(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.is_relationship())
    }
}

// Enforce unique names and identity paths within one entity.
fn validate_properties(
    entity: &'static str,
    properties: &[PropertyDescriptor],
    config: &RegistryConfig,
) -> Result<(), SchemaError> {
    let mut names: HashSet<&str> = HashSet::with_capacity(properties.len());
    let mut paths: HashMap<&str, &'static str> = HashMap::with_capacity(properties.len());

    for property in properties {
        validate::validate_property_name(property.name, config.max_property_name_len)?;
        validate::validate_identity_path(property.identity_path)?;

        if !names.insert(property.name) {
            return Err(SchemaError::DuplicateProperty {
                entity,
                property: property.name,
            });
        }

        if let Some(first) = paths.get(property.identity_path).copied() {
            match config.ambiguity {
                AmbiguityPolicy::Reject => {
                    return Err(SchemaError::AmbiguousSortKey {
                        entity,
                        path: property.identity_path,
                        first,
                        second: property.name,
                    });
                }
                AmbiguityPolicy::FirstMatch => {
                    tracing::warn!(
                        entity,
                        path = property.identity_path,
                        first,
                        shadowed = property.name,
                        "identity path declared twice; first match wins"
                    );
                }
            }
        } else {
            paths.insert(property.identity_path, property.name);
        }
    }

    Ok(())
}

///
/// VersionHash
///
/// Stable SHA-256 digest of an entity's stored shape. Changes whenever a
/// stored name, stored type, relationship target, or hash modifier changes;
/// renaming identifiers do not participate.
///

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VersionHash([u8; 32]);

impl VersionHash {
    fn compute(
        canonical_name: &str,
        hash_modifier: Option<&str>,
        properties: &[PropertyDescriptor],
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"entityvh:v1");
        write_str(&mut hasher, canonical_name);
        write_opt_str(&mut hasher, hash_modifier);
        write_len(&mut hasher, properties.len());

        for property in properties {
            write_str(&mut hasher, property.name);
            write_tag(&mut hasher, property.stored_type.tag());
            if let Some(rel) = property.relationship() {
                write_str(&mut hasher, rel.target);
                write_tag(&mut hasher, rel.cardinality.tag());
            }
            write_opt_str(&mut hasher, property.hash_modifier);
        }

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Self(out)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Debug for VersionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionHash({})", self.as_hex())
    }
}

impl fmt::Display for VersionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl Serialize for VersionHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

#[allow(clippy::cast_possible_truncation)]
fn write_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u32).to_be_bytes());
}

fn write_str(hasher: &mut Sha256, s: &str) {
    write_len(hasher, s.len());
    hasher.update(s.as_bytes());
}

fn write_opt_str(hasher: &mut Sha256, s: Option<&str>) {
    match s {
        Some(s) => {
            write_tag(hasher, 1);
            write_str(hasher, s);
        }
        None => write_tag(hasher, 0),
    }
}
