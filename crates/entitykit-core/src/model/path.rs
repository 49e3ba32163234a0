use crate::traits::PersistentModel;
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
};

///
/// PropertyPath
///
/// Typed identity path: a reference to one property of model `M` holding a
/// value of type `T`, independent of the property's stored name.
///
/// Carries only the raw structural path (e.g. `"full_name"` or
/// `"owner.name"` for a path through a relationship). Paths are declared as
/// associated consts on the model so that a sort request against the wrong
/// model fails to compile.
///

pub struct PropertyPath<M, T> {
    raw: &'static str,
    _marker: PhantomData<fn() -> (M, T)>,
}

impl<M: PersistentModel, T> PropertyPath<M, T> {
    #[must_use]
    pub const fn new(raw: &'static str) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<M, T> PropertyPath<M, T> {
    /// Raw structural path, used verbatim as the structural sort fallback.
    #[must_use]
    pub const fn raw(&self) -> &'static str {
        self.raw
    }
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------
// Manual impls: derives would require `M: Clone` and `T: Clone`.

impl<M, T> Clone for PropertyPath<M, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, T> Copy for PropertyPath<M, T> {}

impl<M, T> PartialEq for PropertyPath<M, T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<M, T> Eq for PropertyPath<M, T> {}

impl<M, T> Debug for PropertyPath<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyPath(#{})", self.raw)
    }
}

impl<M, T> Display for PropertyPath<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
