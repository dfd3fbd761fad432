//! Per-path observer lists and dispatch.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{Origin, Path, Value, ValueRef};

/// Error surfaced by an observer callback during dispatch.
///
/// Observers own their failure payloads; the dispatch boundary reports the
/// error and moves on. Nothing propagates to the writer.
pub type ObserverError = Box<dyn std::error::Error>;

/// Callback invoked with a defensive copy of the updated value, the path it
/// was stored under, and the origin of the write.
pub type ObserverFn = dyn Fn(ValueRef, &Path, Origin) -> Result<(), ObserverError>;

/// Removal token for one (path, callback) binding.
///
/// The pair itself is the identity: removal matches on the path plus the
/// callback allocation (`Rc::ptr_eq`). There is no generated id.
#[derive(Clone)]
pub struct Registration {
    path: Path,
    handler: Rc<ObserverFn>,
}

impl Registration {
    /// The path this registration observes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Ordered observer lists keyed by path.
///
/// Invariant: a path present in the map always holds a non-empty list; the
/// entry is deleted when its last handler is removed.
#[derive(Default)]
pub struct ObserverRegistry {
    entries: BTreeMap<Path, Vec<Rc<ObserverFn>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `path`, creating the list on first
    /// use. Registrations keep insertion order; registering the same
    /// handler twice yields two entries, and both fire on dispatch.
    pub fn add(&mut self, path: Path, handler: Rc<ObserverFn>) -> Registration {
        self.entries
            .entry(path.clone())
            .or_default()
            .push(Rc::clone(&handler));

        Registration { path, handler }
    }

    /// Remove the first entry matching `registration`.
    ///
    /// Best-effort: removing an unknown or already-removed registration is
    /// silently ignored. When the list empties, the path entry is deleted.
    pub fn remove(&mut self, registration: &Registration) {
        let Some(handlers) = self.entries.get_mut(&registration.path) else {
            return;
        };

        if let Some(index) = handlers
            .iter()
            .position(|h| Rc::ptr_eq(h, &registration.handler))
        {
            handlers.remove(index);
        }

        if handlers.is_empty() {
            self.entries.remove(&registration.path);
        }
    }

    /// Snapshot of the handler list for `path`, in registration order.
    ///
    /// Dispatching over a snapshot lets callers run handlers without
    /// holding a borrow of the registry, so handlers may re-enter the
    /// owning store.
    pub fn handlers(&self, path: &Path) -> Vec<Rc<ObserverFn>> {
        self.entries.get(path).cloned().unwrap_or_default()
    }

    /// Invoke every handler registered for `path`, in registration order.
    ///
    /// Each handler receives its own shallow copy of `value`. A path with
    /// no observers is a no-op. Handler failures are isolated: the error is
    /// reported through the `log` facade and the remaining handlers still
    /// run.
    pub fn dispatch(&self, path: &Path, value: &ValueRef, origin: Origin) {
        dispatch_all(&self.handlers(path), path, value, origin);
    }

    /// Number of handlers currently registered for `path`.
    pub fn observer_count(&self, path: &Path) -> usize {
        self.entries.get(path).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fan a value out to an already-snapshotted handler list.
pub(crate) fn dispatch_all(
    handlers: &[Rc<ObserverFn>],
    path: &Path,
    value: &ValueRef,
    origin: Origin,
) {
    for handler in handlers {
        let delivered = Value::shallow_copy(value);
        if let Err(error) = handler(delivered, path, origin) {
            log::warn!("observer for '{}' failed: {}", path, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::path;

    fn recorder(
        log: &Rc<RefCell<Vec<String>>>,
        tag: &str,
    ) -> Rc<ObserverFn> {
        let log = Rc::clone(log);
        let tag = tag.to_string();
        Rc::new(move |value: ValueRef, path: &Path, _origin: Origin| {
            log.borrow_mut()
                .push(format!("{}:{}={:?}", tag, path, value));
            Ok(())
        })
    }

    #[test]
    fn dispatch_runs_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        registry.add(path!("x"), recorder(&calls, "first"));
        registry.add(path!("x"), recorder(&calls, "second"));
        registry.add(path!("y"), recorder(&calls, "other"));

        registry.dispatch(&path!("x"), &Rc::new(Value::from(1)), Origin::Direct);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("first:"));
        assert!(calls[1].starts_with("second:"));
    }

    #[test]
    fn duplicate_handlers_both_fire() {
        let count = Rc::new(RefCell::new(0));
        let handler: Rc<ObserverFn> = {
            let count = Rc::clone(&count);
            Rc::new(move |_: ValueRef, _: &Path, _: Origin| {
                *count.borrow_mut() += 1;
                Ok(())
            })
        };

        let mut registry = ObserverRegistry::new();
        let first = registry.add(path!("x"), Rc::clone(&handler));
        registry.add(path!("x"), handler);

        registry.dispatch(&path!("x"), &Rc::new(Value::Null), Origin::Direct);
        assert_eq!(*count.borrow(), 2);

        // Removing via one token drops exactly one of the two entries.
        registry.remove(&first);
        assert_eq!(registry.observer_count(&path!("x")), 1);
    }

    #[test]
    fn remove_keeps_other_registrations_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        registry.add(path!("x"), recorder(&calls, "a"));
        let middle = registry.add(path!("x"), recorder(&calls, "b"));
        registry.add(path!("x"), recorder(&calls, "c"));

        registry.remove(&middle);
        registry.dispatch(&path!("x"), &Rc::new(Value::Null), Origin::Direct);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("a:"));
        assert!(calls[1].starts_with("c:"));
    }

    #[test]
    fn removing_last_handler_deletes_the_entry() {
        let mut registry = ObserverRegistry::new();
        let reg = registry.add(
            path!("x"),
            Rc::new(|_: ValueRef, _: &Path, _: Origin| Ok(())),
        );

        registry.remove(&reg);
        assert!(registry.is_empty());
        assert_eq!(registry.observer_count(&path!("x")), 0);

        // Double-remove and unknown-remove are silent.
        registry.remove(&reg);
        registry.dispatch(&path!("x"), &Rc::new(Value::Null), Origin::Direct);
    }

    #[test]
    fn dispatch_without_observers_is_a_no_op() {
        let registry = ObserverRegistry::new();
        registry.dispatch(&path!("nobody"), &Rc::new(Value::from(1)), Origin::Direct);
    }

    #[test]
    fn a_failing_handler_does_not_block_the_rest() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        registry.add(
            path!("x"),
            Rc::new(|_: ValueRef, _: &Path, _: Origin| Err("broken observer".into())),
        );
        registry.add(path!("x"), recorder(&calls, "survivor"));

        registry.dispatch(&path!("x"), &Rc::new(Value::from(1)), Origin::Direct);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn each_handler_gets_an_independent_copy() {
        let seen = Rc::new(RefCell::new(Vec::<ValueRef>::new()));
        let mut registry = ObserverRegistry::new();

        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            registry.add(
                path!("list"),
                Rc::new(move |value: ValueRef, _: &Path, _: Origin| {
                    seen.borrow_mut().push(value);
                    Ok(())
                }),
            );
        }

        let original = Rc::new(Value::array_of([1, 2]));
        registry.dispatch(&path!("list"), &original, Origin::Direct);

        let seen = seen.borrow();
        assert!(!Rc::ptr_eq(&seen[0], &seen[1]));
        assert!(!Rc::ptr_eq(&seen[0], &original));
        assert_eq!(*seen[0], *original);
    }
}
