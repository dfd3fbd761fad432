//! Behavior construction and per-component bindings.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;

use cratestore_core::{Crate, Origin, Path, Registration, SourceId, ValueRef};

use crate::convert;
use crate::{Error, Properties};

static NEXT_SOURCE: AtomicU64 = AtomicU64::new(1);

fn next_source_id() -> SourceId {
    SourceId::new(NEXT_SOURCE.fetch_add(1, Ordering::Relaxed))
}

/// A shared store plus the property declarations it was built from.
///
/// One `Behavior` backs a family of sibling components. Each component
/// attaches to it and gets a [`Binding`] - its private handle for typed
/// reads, typed writes, and change subscriptions.
///
/// ```rust
/// use cratestore_behavior::{Behavior, Properties, PropertySpec};
///
/// let behavior = Behavior::new(
///     Properties::new().declare("selected", PropertySpec::new().with_default(0)),
/// );
///
/// let binding = behavior.attach();
/// assert_eq!(binding.pull::<i64>("selected").unwrap(), Some(0));
/// ```
pub struct Behavior {
    store: Rc<Crate>,
    properties: Rc<Properties>,
}

impl Behavior {
    /// Build a behavior around a fresh store seeded from the declared
    /// property defaults.
    pub fn new(properties: Properties) -> Self {
        let store = Rc::new(Crate::with_payload(properties.seed()));
        Behavior {
            store,
            properties: Rc::new(properties),
        }
    }

    /// The underlying shared store.
    pub fn store(&self) -> &Rc<Crate> {
        &self.store
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Attach a component: hand out a binding with a fresh source id.
    pub fn attach(&self) -> Binding {
        let id = next_source_id();
        log::debug!("attaching binding {}", id);
        Binding {
            store: Rc::clone(&self.store),
            properties: Rc::clone(&self.properties),
            id,
            registrations: Vec::new(),
        }
    }
}

/// One component's attachment to a [`Behavior`].
///
/// A binding owns every observer registration it creates and removes them
/// all on [`Binding::detach`] or drop. Writes made through a binding carry
/// its [`SourceId`], and the binding's own subscriptions skip deliveries
/// tagged with that id - a component never hears the echo of its own
/// write.
///
/// The `apply` callback given to [`Binding::bind`] must update the
/// component's local state without writing back through [`Binding::push`];
/// pushing from inside `apply` would bounce the update between bindings
/// indefinitely.
pub struct Binding {
    store: Rc<Crate>,
    properties: Rc<Properties>,
    id: SourceId,
    registrations: Vec<Registration>,
}

impl Binding {
    /// The id stamped onto writes made through this binding.
    pub fn source_id(&self) -> SourceId {
        self.id
    }

    /// Subscribe the component to `path`.
    ///
    /// Deliveries are decoded to `T` and handed to `apply`. Deliveries
    /// originating from this binding's own pushes are skipped. A value
    /// that fails to decode surfaces as an observer error: reported at the
    /// dispatch boundary, other observers unaffected.
    pub fn bind<T, F>(&mut self, path: impl Into<Path>, apply: F)
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + 'static,
    {
        let id = self.id;
        let registration = self
            .store
            .add_observer(path, move |value: ValueRef, path, origin| {
                if origin.is_from(id) {
                    return Ok(());
                }

                let typed: T = convert::from_value(&value).map_err(|source| Error::Decode {
                    path: path.clone(),
                    source,
                })?;
                apply(typed);
                Ok(())
            });

        self.registrations.push(registration);
    }

    /// Write a component-side change into the store.
    ///
    /// The write is tagged with this binding's source id so the binding's
    /// own subscription stays quiet while every other observer is
    /// notified. Properties declared `silent` store without any fan-out.
    pub fn push<T: Serialize>(&self, path: impl Into<Path>, value: &T) -> Result<(), Error> {
        let path = path.into();
        let value = convert::to_value(value).map_err(|source| Error::Encode {
            path: path.clone(),
            source,
        })?;

        if self.properties.notify_for(&path) {
            self.store.set_from(path, value, Origin::Binding(self.id));
        } else {
            self.store.set_silent(path, value);
        }
        Ok(())
    }

    /// Read the current value for `path`, decoded to `T`.
    pub fn pull<T: DeserializeOwned>(&self, path: impl Into<Path>) -> Result<Option<T>, Error> {
        let path = path.into();
        match self.store.get(&path) {
            Some(value) => convert::from_value(&value)
                .map(Some)
                .map_err(|source| Error::Decode { path, source }),
            None => Ok(None),
        }
    }

    /// Remove every registration this binding created.
    ///
    /// Called automatically on drop; explicit detach is for components
    /// that outlive their participation.
    pub fn detach(&mut self) {
        if !self.registrations.is_empty() {
            log::debug!("detaching binding {}", self.id);
        }
        for registration in self.registrations.drain(..) {
            self.store.remove_observer(&registration);
        }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.detach();
    }
}
