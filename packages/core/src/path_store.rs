//! Flat keyed storage - one slot per path, no nesting.

use std::collections::BTreeMap;

use crate::{Path, ValueRef};

/// Direct key-addressed storage.
///
/// A `PathStore` maps whole paths to values. Lookups and writes touch
/// exactly one slot; there is no traversal into stored containers. Any
/// string is a valid key.
#[derive(Debug, Default)]
pub struct PathStore {
    slots: BTreeMap<Path, ValueRef>,
}

impl PathStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with initial entries.
    pub fn from_entries<P: Into<Path>, V: Into<ValueRef>>(
        entries: impl IntoIterator<Item = (P, V)>,
    ) -> Self {
        PathStore {
            slots: entries
                .into_iter()
                .map(|(p, v)| (p.into(), v.into()))
                .collect(),
        }
    }

    /// The stored handle for `path`, or `None` if the slot is empty.
    pub fn get(&self, path: &Path) -> Option<&ValueRef> {
        self.slots.get(path)
    }

    /// Unconditionally overwrite the slot for `path`.
    pub fn set(&mut self, path: Path, value: ValueRef) {
        self.slots.insert(path, value);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the occupied paths in key order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.slots.keys()
    }
}
