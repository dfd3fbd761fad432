//! The Path type - an opaque flat key addressing one slot in a store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A flat string key addressing a single slot in a [`crate::Crate`].
///
/// Despite the name, a `Path` is opaque: the store never splits it into
/// components and never traverses into stored values. `"profile.name"`
/// addresses one slot whose key happens to contain a dot. Sub-property
/// observation is a known limitation and deliberately unimplemented.
///
/// # Examples
///
/// ```rust
/// use cratestore_core::{path, Path};
///
/// let a = Path::from("count");
/// let b = path!("count");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "count");
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(String);

impl Path {
    /// Create a path from any string-like key. No validation is performed.
    pub fn new(key: impl Into<String>) -> Self {
        Path(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Path(key.to_string())
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Path(key)
    }
}

impl From<&Path> for Path {
    fn from(key: &Path) -> Self {
        key.clone()
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Construct a [`Path`] from a string expression.
///
/// ```rust
/// use cratestore_core::path;
///
/// let p = path!("selected_user");
/// assert_eq!(p.as_str(), "selected_user");
/// ```
#[macro_export]
macro_rules! path {
    ($key:expr) => {
        $crate::Path::from($key)
    };
}
