use crate::{model::property::PropertyDescriptor, value::Value};

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified type path of a model, e.g. `app::model::Person`.
///

pub trait Path {
    const PATH: &'static str;

    /// Last path segment; the type's own identifying name.
    #[must_use]
    fn type_ident() -> &'static str {
        Self::PATH.rsplit("::").next().unwrap_or(Self::PATH)
    }
}

// ============================================================================
// PERSISTENT MODELS
// ============================================================================

///
/// PersistentModel
///
/// A caller-defined type that maps onto one store entity.
///
/// Implementors supply an explicit, statically constructed property table.
/// The default `schema_metadata` returns `None`; the registry turns that into
/// `SchemaError::MissingSchema` unless a caller-supplied override exists.
///

pub trait PersistentModel: Path + 'static {
    /// Explicit canonical entity name. Falls back to `Path::type_ident`.
    const ENTITY_NAME: Option<&'static str> = None;

    /// Renaming identifier (pre-rename entity name).
    const ORIGINAL_NAME: Option<&'static str> = None;

    /// Version hash modifier.
    const HASH_MODIFIER: Option<&'static str> = None;

    /// Declared persistent properties, in declaration order.
    #[must_use]
    fn schema_metadata() -> Option<&'static [PropertyDescriptor]> {
        None
    }

    /// Canonical entity name for this model.
    #[must_use]
    fn canonical_name() -> &'static str {
        Self::ENTITY_NAME.unwrap_or_else(Self::type_ident)
    }
}

///
/// FetchExecutor
///
/// Boundary to the external persistence engine. Implementations run a
/// `FetchSpecification` and return model instances; their errors pass
/// through untouched.
///

pub trait FetchExecutor<M: PersistentModel> {
    type Error;

    fn execute(&self, spec: crate::query::FetchSpecification) -> Result<Vec<M>, Self::Error>;
}

// ============================================================================
// VALUES
// ============================================================================

///
/// FieldValue
///
/// Conversion of Rust scalars into predicate operands.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::None, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for &T {
    fn to_value(&self) -> Value {
        (*self).to_value()
    }
}

macro_rules! impl_field_value_int {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_field_value_uint {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64);
impl_field_value_uint!(u8, u16, u32, u64);
