//! Sibling components syncing through a behavior, end to end.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use cratestore_behavior::{path, Behavior, Properties, PropertySpec};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Filter {
    query: String,
    include_archived: bool,
}

/// A stand-in for a UI component: local state plus a binding.
struct FilterPanel {
    state: Rc<RefCell<Filter>>,
    binding: cratestore_behavior::Binding,
}

impl FilterPanel {
    fn attach(behavior: &Behavior) -> Self {
        let state = Rc::new(RefCell::new(Filter::default()));
        let mut binding = behavior.attach();
        {
            let state = Rc::clone(&state);
            binding.bind::<Filter, _>("filter", move |filter| {
                *state.borrow_mut() = filter;
            });
        }
        FilterPanel { state, binding }
    }

    /// Simulates the user editing the panel's local controls.
    fn edit(&self, filter: Filter) {
        *self.state.borrow_mut() = filter.clone();
        self.binding.push("filter", &filter).unwrap();
    }

    fn current(&self) -> Filter {
        self.state.borrow().clone()
    }
}

#[test]
fn sibling_panels_stay_in_sync() {
    let behavior = Behavior::new(
        Properties::new().declare("filter", PropertySpec::new()),
    );

    let toolbar = FilterPanel::attach(&behavior);
    let sidebar = FilterPanel::attach(&behavior);

    let edited = Filter {
        query: "rust".to_string(),
        include_archived: true,
    };
    toolbar.edit(edited.clone());

    // The sibling picked the change up through the store.
    assert_eq!(sidebar.current(), edited);
    // The editor kept its own state; no echo came back through its binding.
    assert_eq!(toolbar.current(), edited);

    // And the store holds the same value, readable by a late joiner.
    let late = behavior.attach();
    assert_eq!(late.pull::<Filter>("filter").unwrap(), Some(edited));
}

#[test]
fn updates_flow_both_ways() {
    let behavior = Behavior::new(
        Properties::new().declare("filter", PropertySpec::new()),
    );

    let a = FilterPanel::attach(&behavior);
    let b = FilterPanel::attach(&behavior);

    a.edit(Filter {
        query: "first".to_string(),
        include_archived: false,
    });
    assert_eq!(b.current().query, "first");

    b.edit(Filter {
        query: "second".to_string(),
        include_archived: false,
    });
    assert_eq!(a.current().query, "second");
}

#[test]
fn a_detached_panel_stops_following() {
    let behavior = Behavior::new(
        Properties::new().declare("filter", PropertySpec::new()),
    );

    let active = FilterPanel::attach(&behavior);
    let closed = FilterPanel::attach(&behavior);

    active.edit(Filter {
        query: "before".to_string(),
        include_archived: false,
    });
    assert_eq!(closed.current().query, "before");

    drop(closed);

    // No stale callback fires; the remaining panel still works.
    active.edit(Filter {
        query: "after".to_string(),
        include_archived: false,
    });
    assert_eq!(active.current().query, "after");
    assert_eq!(behavior.store().observer_count(&path!("filter")), 1);
}

#[test]
fn a_misbehaving_observer_cannot_block_its_siblings() {
    let behavior = Behavior::new(
        Properties::new().declare("count", PropertySpec::new().with_default(0)),
    );

    // This binding expects a string where integers will arrive, so every
    // delivery to it fails to decode.
    let mut broken = behavior.attach();
    broken.bind::<String, _>("count", |_| {});

    let healthy_saw = Rc::new(RefCell::new(Vec::new()));
    let mut healthy = behavior.attach();
    {
        let healthy_saw = Rc::clone(&healthy_saw);
        healthy.bind::<i64, _>("count", move |n| healthy_saw.borrow_mut().push(n));
    }

    let writer = behavior.attach();
    writer.push("count", &7i64).unwrap();

    // The decode failure was isolated; delivery continued.
    assert_eq!(*healthy_saw.borrow(), vec![7]);
}

#[test]
fn typed_errors_name_the_path() {
    let behavior = Behavior::new(Properties::new());
    let binding = behavior.attach();

    behavior.store().set("age", "not a number");
    let error = binding.pull::<i64>("age").unwrap_err();
    assert!(error.to_string().contains("'age'"));
}
