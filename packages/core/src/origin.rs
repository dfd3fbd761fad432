//! Update-source tags for echo suppression.

use std::fmt;

/// Identifies one writer attached to a store, typically a component binding.
///
/// Ids are opaque; callers allocate them however they like (the behavior
/// layer hands out a fresh id per binding).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    pub const fn new(raw: u64) -> Self {
        SourceId(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Where a write came from.
///
/// Every write carries an origin and every observer receives it, so a
/// bidirectional binding can recognize deliveries caused by its own write
/// and skip them instead of echoing the update back into its component.
/// The store itself never interprets the tag.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Origin {
    /// Written directly on the store, outside any binding.
    Direct,
    /// Written through the binding carrying this id.
    Binding(SourceId),
}

impl Origin {
    /// True when this update was written by the given source.
    pub fn is_from(self, id: SourceId) -> bool {
        matches!(self, Origin::Binding(own) if own == id)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Direct => f.write_str("direct"),
            Origin::Binding(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_from_matches_only_the_same_id() {
        let a = SourceId::new(1);
        let b = SourceId::new(2);

        assert!(Origin::Binding(a).is_from(a));
        assert!(!Origin::Binding(a).is_from(b));
        assert!(!Origin::Direct.is_from(a));
    }
}
