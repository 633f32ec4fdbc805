//! Extended type to qualified property name mapping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::parser::ExtensionDecl;

/// Map from extended message type to the extension properties declared for it.
///
/// Keys are always ordered. Property lists are in discovery order until
/// [`ExtensionMap::finalize`] sorts them. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtensionMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl ExtensionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `qualified_name` to the list for `extended_type`.
    pub fn insert(&mut self, extended_type: String, qualified_name: String) {
        self.entries
            .entry(extended_type)
            .or_default()
            .push(qualified_name);
    }

    /// Add every declaration found in one file.
    pub fn extend_from(&mut self, decls: Vec<ExtensionDecl>) {
        for decl in decls {
            self.insert(decl.extended_type, decl.qualified_name);
        }
    }

    /// Sort every property list.
    #[must_use]
    pub fn finalize(mut self) -> Self {
        for names in self.entries.values_mut() {
            names.sort();
        }
        self
    }

    #[must_use]
    pub fn get(&self, extended_type: &str) -> Option<&[String]> {
        self.entries.get(extended_type).map(Vec::as_slice)
    }

    /// Extended types, in order.
    pub fn extended_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of extended types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of property entries across all extended types.
    #[must_use]
    pub fn declarations_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
