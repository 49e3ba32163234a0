use crate::{
    query::predicate::{CompareOp, ComparePredicate, Predicate},
    traits::FieldValue,
    value::Value,
};

///
/// FieldRef
///
/// Zero-cost wrapper around a stored field name used in predicates.
/// Enables method-based predicate builders without allocating until a
/// predicate is produced.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldRef(&'static str);

impl FieldRef {
    /// Create a new field reference.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Return the underlying field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    // ------------------------------------------------------------------
    // Comparison predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Eq, value.to_value())
    }

    #[must_use]
    pub fn ne(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Ne, value.to_value())
    }

    #[must_use]
    pub fn lt(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Lt, value.to_value())
    }

    #[must_use]
    pub fn lte(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Lte, value.to_value())
    }

    #[must_use]
    pub fn gt(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Gt, value.to_value())
    }

    #[must_use]
    pub fn gte(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::Gte, value.to_value())
    }

    /// Membership test against a fixed list.
    #[must_use]
    pub fn in_list<I, V>(self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        compare(
            self.0,
            CompareOp::In,
            Value::List(values.into_iter().map(|v| v.to_value()).collect()),
        )
    }

    #[must_use]
    pub fn starts_with(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::StartsWith, value.to_value())
    }

    #[must_use]
    pub fn ends_with(self, value: impl FieldValue) -> Predicate {
        compare(self.0, CompareOp::EndsWith, value.to_value())
    }

    // ------------------------------------------------------------------
    // Structural predicates
    // ------------------------------------------------------------------

    /// Field is nil.
    #[must_use]
    pub fn is_null(self) -> Predicate {
        Predicate::IsNull {
            field: self.0.to_string(),
        }
    }

    /// Field is present but empty (collection- or string-specific).
    #[must_use]
    pub fn is_empty(self) -> Predicate {
        Predicate::IsEmpty {
            field: self.0.to_string(),
        }
    }

    #[must_use]
    pub fn is_not_empty(self) -> Predicate {
        Predicate::IsNotEmpty {
            field: self.0.to_string(),
        }
    }

    /// Case-sensitive substring match for text fields.
    #[must_use]
    pub fn text_contains(self, value: impl FieldValue) -> Predicate {
        Predicate::TextContains {
            field: self.0.to_string(),
            value: value.to_value(),
        }
    }

    /// Case-insensitive substring match for text fields.
    #[must_use]
    pub fn text_contains_ci(self, value: impl FieldValue) -> Predicate {
        Predicate::TextContainsCi {
            field: self.0.to_string(),
            value: value.to_value(),
        }
    }
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------

impl AsRef<str> for FieldRef {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::ops::Deref for FieldRef {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

fn compare(field: &str, op: CompareOp, value: Value) -> Predicate {
    Predicate::Compare(ComparePredicate::new(field, op, value))
}
