//! The Crate facade - keyed storage composed with observer dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use crate::observer::dispatch_all;
use crate::{
    ObserverError, ObserverFn, ObserverRegistry, Origin, Path, PathStore, Registration, Value,
    ValueRef,
};

/// A shared store: flat keyed payload plus per-path observer dispatch.
///
/// `Crate` is the mediator sibling components talk through. A write stores
/// a defensive shallow copy of the value and synchronously fans the update
/// out to every observer registered for that path; each observer receives
/// its own shallow copy, independent of the stored one and of every other
/// delivery.
///
/// # Reads are zero-copy
///
/// [`Crate::get`] returns the stored handle itself, not a copy. The handle
/// is immutable-shared: mutating through it requires [`Rc::make_mut`],
/// which unshares first, so stored state can never be changed behind the
/// store's back. Writes copy, reads share - that is the contract.
///
/// # Reentrancy
///
/// Dispatch runs over a snapshot of the observer list with no internal
/// borrow held. An observer may therefore call back into the same store -
/// including `set` on the path currently being dispatched, which runs its
/// full inner dispatch before the outer batch resumes. The store applies
/// no echo guard of its own; bindings break update loops with the
/// [`Origin`] tag they pass to [`Crate::set_from`].
///
/// # Threading
///
/// Single-threaded by design (`Rc`/`RefCell` internally, `!Send`). Every
/// operation runs to completion on the calling stack; there is no deferred
/// or asynchronous delivery.
///
/// # Examples
///
/// ```rust
/// use cratestore_core::{path, Crate};
///
/// let store = Crate::new();
/// store.set("count", 1);
/// assert_eq!(store.get(&path!("count")).unwrap().as_integer(), Some(1));
/// ```
#[derive(Default)]
pub struct Crate {
    payload: RefCell<PathStore>,
    observers: RefCell<ObserverRegistry>,
}

impl Crate {
    /// Create a store with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an existing payload.
    pub fn with_payload(payload: PathStore) -> Self {
        Crate {
            payload: RefCell::new(payload),
            observers: RefCell::new(ObserverRegistry::new()),
        }
    }

    /// Store a shallow copy of `value` under `path` and notify every
    /// observer of that path, tagged [`Origin::Direct`].
    pub fn set(&self, path: impl Into<Path>, value: impl Into<Value>) {
        self.set_from(path, value, Origin::Direct);
    }

    /// Store a shallow copy of `value` under `path` without notifying
    /// anyone.
    pub fn set_silent(&self, path: impl Into<Path>, value: impl Into<Value>) {
        let path = path.into();
        let incoming = Rc::new(value.into());
        self.payload
            .borrow_mut()
            .set(path, Value::shallow_copy(&incoming));
    }

    /// Store a shallow copy of `value` under `path` and notify observers
    /// with an explicit origin tag.
    ///
    /// Observers receive shallow copies made at delivery time from the
    /// caller's value, so the stored copy and every delivered copy are
    /// independent containers.
    pub fn set_from(&self, path: impl Into<Path>, value: impl Into<Value>, origin: Origin) {
        let path = path.into();
        let incoming = Rc::new(value.into());
        log::debug!("writing '{}' ({})", path, origin);

        self.payload
            .borrow_mut()
            .set(path.clone(), Value::shallow_copy(&incoming));

        let handlers = self.observers.borrow().handlers(&path);
        dispatch_all(&handlers, &path, &incoming, origin);
    }

    /// The stored handle for `path`, or `None` if the slot is empty.
    ///
    /// No copy is made; see the type-level notes on the zero-copy read
    /// contract.
    pub fn get(&self, path: &Path) -> Option<ValueRef> {
        self.payload.borrow().get(path).cloned()
    }

    /// Fan `value` out to the observers of `path` without storing it.
    pub fn dispatch(&self, path: &Path, value: &ValueRef, origin: Origin) {
        let handlers = self.observers.borrow().handlers(path);
        dispatch_all(&handlers, path, value, origin);
    }

    /// Register `handler` for updates to `path`.
    ///
    /// Handlers fire in registration order and may be registered more than
    /// once. The returned token is the only way to remove the handler
    /// again.
    pub fn add_observer<F>(&self, path: impl Into<Path>, handler: F) -> Registration
    where
        F: Fn(ValueRef, &Path, Origin) -> Result<(), ObserverError> + 'static,
    {
        let handler: Rc<ObserverFn> = Rc::new(handler);
        self.observers.borrow_mut().add(path.into(), handler)
    }

    /// Remove a previously registered observer.
    ///
    /// Best-effort: unknown or already-removed registrations are ignored.
    pub fn remove_observer(&self, registration: &Registration) {
        self.observers.borrow_mut().remove(registration);
    }

    /// Number of observers currently registered for `path`.
    pub fn observer_count(&self, path: &Path) -> usize {
        self.observers.borrow().observer_count(path)
    }
}

impl std::fmt::Debug for Crate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crate")
            .field("slots", &self.payload.borrow().len())
            .finish_non_exhaustive()
    }
}
