use crate::query::predicate::Predicate;
use serde::Serialize;
use std::fmt::{self, Display};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn from_ascending(ascending: bool) -> Self {
        if ascending { Self::Asc } else { Self::Desc }
    }

    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

///
/// SortKeySource
///
/// Where a sort key's field came from: a declared property's stored name,
/// or the raw identity path used as a structural fallback.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum SortKeySource {
    Schema,
    Structural,
}

///
/// SortKey
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: OrderDirection,
    pub source: SortKeySource,
}

impl SortKey {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    /// `(field, ascending)` view of this key.
    #[must_use]
    pub fn as_pair(&self) -> (&str, bool) {
        (&self.field, self.is_ascending())
    }
}

///
/// FetchSpecification
///
/// Declarative description of one fetch: entity, filter, ordering, and
/// bounds. Created fresh per query, owned by the caller, and consumed by
/// the persistence engine.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FetchSpecification {
    pub entity_name: &'static str,
    pub predicate: Option<Predicate>,
    pub sort_keys: Vec<SortKey>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl FetchSpecification {
    /// Unfiltered, unordered, unbounded fetch of one entity.
    #[must_use]
    pub const fn new(entity_name: &'static str) -> Self {
        Self {
            entity_name,
            predicate: None,
            sort_keys: Vec::new(),
            offset: None,
            limit: None,
        }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }
}

// Single-line summary for logs.
impl Display for FetchSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FETCH {}", self.entity_name)?;

        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {predicate}")?;
        }

        if !self.sort_keys.is_empty() {
            f.write_str(" ORDER BY ")?;
            for (i, key) in self.sort_keys.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                let dir = if key.is_ascending() { "ASC" } else { "DESC" };
                write!(f, "{} {dir}", key.field)?;
            }
        }

        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }

        Ok(())
    }
}
