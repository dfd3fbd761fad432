//! Cratestore core: shared keyed state with per-path observer dispatch.
//!
//! This crate is the mediator layer for sibling UI components that need to
//! share state without a direct parent/child relationship:
//!
//! - [`Path`]: opaque flat key addressing one store slot
//! - [`Value`]: tree-shaped payload with `Rc`-shared container children
//! - [`PathStore`]: direct keyed storage, no traversal
//! - [`ObserverRegistry`]: per-path ordered callback lists
//! - [`Crate`]: the public store composing storage and notification, with
//!   shallow-copy-on-write semantics and zero-copy reads
//! - [`Origin`]/[`SourceId`]: update-source tags bindings use to break
//!   echo loops
//!
//! Everything here is single-threaded and synchronous: a write runs its
//! whole observer fan-out on the calling stack before returning.
//!
//! # Example
//!
//! ```rust
//! use cratestore_core::{path, Crate};
//!
//! let store = Crate::new();
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//!
//! let registration = {
//!     let seen = seen.clone();
//!     store.add_observer("count", move |value, _path, _origin| {
//!         seen.set(value.as_integer().unwrap_or(0));
//!         Ok(())
//!     })
//! };
//!
//! store.set("count", 7);
//! assert_eq!(seen.get(), 7);
//!
//! store.remove_observer(&registration);
//! store.set("count", 8);
//! assert_eq!(seen.get(), 7);
//! ```

mod observer;
mod origin;
mod path;
mod path_store;
mod store;
mod value;

pub use observer::{ObserverError, ObserverFn, ObserverRegistry, Registration};
pub use origin::{Origin, SourceId};
pub use path::Path;
pub use path_store::PathStore;
pub use store::Crate;
pub use value::{Value, ValueRef};
