//! Declared property maps - the config-time description of what a
//! behavior shares.

use std::collections::BTreeMap;
use std::rc::Rc;

use cratestore_core::{Path, PathStore, Value};

/// Declaration for one shared property.
///
/// A spec normalizes the way the store treats the property: an optional
/// default seeded into the payload, and a `notify` flag that defaults to
/// true. Properties declared `silent` still store pushes from bindings but
/// skip the observer fan-out.
#[derive(Clone, Debug, Default)]
pub struct PropertySpec {
    default: Option<Value>,
    silent: bool,
}

impl PropertySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with this value when the behavior is built.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Store pushes for this property without notifying observers.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn notify(&self) -> bool {
        !self.silent
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The full set of properties a behavior shares between its components.
#[derive(Clone, Debug, Default)]
pub struct Properties {
    entries: BTreeMap<Path, PropertySpec>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property. Redeclaring a path replaces its spec.
    ///
    /// ```rust
    /// use cratestore_behavior::{Properties, PropertySpec};
    ///
    /// let properties = Properties::new()
    ///     .declare("selected", PropertySpec::new().with_default(0))
    ///     .declare("draft", PropertySpec::new().silent());
    /// assert_eq!(properties.len(), 2);
    /// ```
    pub fn declare(mut self, path: impl Into<Path>, spec: PropertySpec) -> Self {
        self.entries.insert(path.into(), spec);
        self
    }

    /// Whether writes to `path` should fan out to observers.
    ///
    /// Undeclared paths notify; only an explicit `silent` declaration
    /// turns fan-out off.
    pub fn notify_for(&self, path: &Path) -> bool {
        self.entries.get(path).map_or(true, PropertySpec::notify)
    }

    pub fn get(&self, path: &Path) -> Option<&PropertySpec> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &PropertySpec)> {
        self.entries.iter()
    }

    /// Build the initial store payload from the declared defaults.
    pub fn seed(&self) -> PathStore {
        PathStore::from_entries(self.entries.iter().filter_map(|(path, spec)| {
            spec.default_value()
                .map(|value| (path.clone(), Rc::new(value.clone())))
        }))
    }
}
