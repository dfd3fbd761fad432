//! Behavior layer for Cratestore: typed two-way property sync.
//!
//! Where `cratestore-core` is the raw mediator (keyed slots, observer
//! fan-out), this crate is the piece a UI component actually talks to:
//!
//! - [`Properties`]/[`PropertySpec`]: config-time declaration of the
//!   shared properties and their defaults
//! - [`Behavior`]: one shared store per component family, seeded from the
//!   declarations
//! - [`Binding`]: a component's attachment - typed `bind`/`push`/`pull`
//!   accessors, echo suppression via source ids, and registration teardown
//!   on detach or drop
//! - [`convert`]: serde conversions between component types and stored
//!   values
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use cratestore_behavior::{Behavior, Properties, PropertySpec};
//!
//! let behavior = Behavior::new(
//!     Properties::new().declare("selected", PropertySpec::new().with_default(0)),
//! );
//!
//! // A list component and a detail pane, unrelated in the tree.
//! let list = behavior.attach();
//! let mut detail = behavior.attach();
//!
//! let shown = Rc::new(RefCell::new(0i64));
//! {
//!     let shown = shown.clone();
//!     detail.bind::<i64, _>("selected", move |id| *shown.borrow_mut() = id);
//! }
//!
//! list.push("selected", &42i64).unwrap();
//! assert_eq!(*shown.borrow(), 42);
//! ```

pub mod convert;

mod binding;
mod error;
mod properties;

pub use binding::{Behavior, Binding};
pub use error::Error;
pub use properties::{Properties, PropertySpec};

// Re-export core types for convenience
pub use cratestore_core::{
    path, Crate, ObserverError, Origin, Path, Registration, SourceId, Value, ValueRef,
};
