//! Type parameter tables.
//!
//! A [`TypeParameterTable`] maps the type parameters a callable declares to the
//! concrete instances they are bound to at a specialization site. Tables are
//! persistent values: cloning shares storage, and the first write to a shared
//! table copies it (`Arc::make_mut`). Specializing a generic callable at a use
//! site therefore never changes the declaration it came from.

use crate::types::Type;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

type Entries = IndexMap<String, Option<Type>, FxBuildHasher>;

/// Copy-on-write mapping from type parameter name to its bound instance.
///
/// Entries keep declaration order, which is the order they render in
/// diagnostics. A `None` value is a declared but still unbound parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeParameterTable {
    entries: Arc<Entries>,
}

impl TypeParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an unbound type parameter. Redeclaring keeps the current binding.
    pub fn define(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.entries.contains_key(&name) {
            Arc::make_mut(&mut self.entries).insert(name, None);
        }
    }

    /// Bind `name` to `instance`, declaring it if needed.
    pub fn bind(&mut self, name: impl Into<String>, instance: Type) {
        Arc::make_mut(&mut self.entries).insert(name.into(), Some(instance));
    }

    /// The instance `name` is bound to, if any.
    pub fn instance_of(&self, name: &str) -> Option<&Type> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.instance_of(name).is_some()
    }

    /// A new table holding every entry of `self` overlaid with `extra`.
    ///
    /// Entries present in both take `extra`'s value. Neither input changes.
    pub fn merge(&self, extra: &TypeParameterTable) -> TypeParameterTable {
        if extra.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return extra.clone();
        }

        let mut merged = self.clone();
        let entries = Arc::make_mut(&mut merged.entries);
        for (name, instance) in extra.entries.iter() {
            entries.insert(name.clone(), instance.clone());
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Type>)> {
        self.entries
            .iter()
            .map(|(name, instance)| (name.as_str(), instance.as_ref()))
    }

    /// Whether both tables still share one allocation (no copy has happened).
    pub fn shares_storage_with(&self, other: &TypeParameterTable) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<N: Into<String>> FromIterator<(N, Type)> for TypeParameterTable {
    fn from_iter<I: IntoIterator<Item = (N, Type)>>(iter: I) -> Self {
        let mut table = TypeParameterTable::new();
        for (name, instance) in iter {
            table.bind(name, instance);
        }
        table
    }
}

#[cfg(test)]
#[path = "../tests/type_params_tests.rs"]
mod tests;
