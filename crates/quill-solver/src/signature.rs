//! Ordered name-to-type tables.
//!
//! A [`SignatureTable`] holds the parameters of a callable (receiver first)
//! and the synthesized attributes attached to it. Declaration order is
//! significant: compatibility compares parameters positionally.

use crate::types::Type;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// One entry in a [`SignatureTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub ty: Type,
    pub mutable: bool,
}

/// Ordered mapping from name to [`Signature`].
///
/// Redefining an existing name replaces its signature but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureTable {
    entries: IndexMap<String, Signature, FxBuildHasher>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`, returning its position in the table.
    pub fn define(&mut self, name: impl Into<String>, ty: Type, mutable: bool) -> usize {
        let (index, _) = self.entries.insert_full(name.into(), Signature { ty, mutable });
        index
    }

    /// Define `name` at the front of the table, shifting every other entry
    /// back by one. An existing entry is moved to the front.
    pub fn define_first(&mut self, name: impl Into<String>, ty: Type, mutable: bool) {
        self.entries.shift_insert(0, name.into(), Signature { ty, mutable });
    }

    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.entries.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    /// The entry at `index`, in declaration order.
    pub fn at(&self, index: usize) -> Option<(&str, &Signature)> {
        self.entries
            .get_index(index)
            .map(|(name, signature)| (name.as_str(), signature))
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> Option<&mut Signature> {
        self.entries
            .get_index_mut(index)
            .map(|(_, signature)| signature)
    }

    pub fn last(&self) -> Option<(&str, &Signature)> {
        self.entries
            .last()
            .map(|(name, signature)| (name.as_str(), signature))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.entries
            .iter()
            .map(|(name, signature)| (name.as_str(), signature))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.entries.values().map(|signature| &signature.ty)
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
