//! Error type for the behavior layer.

use cratestore_core::Path;

/// Errors at the typed accessor seam.
///
/// The store itself never fails; everything here comes from converting
/// between component types and stored values. Inside an observer these
/// convert into [`cratestore_core::ObserverError`] through the standard
/// boxing conversion and are reported at the dispatch boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to encode value for '{path}': {source}")]
    Encode {
        path: Path,
        source: serde_json::Error,
    },

    #[error("failed to decode value at '{path}': {source}")]
    Decode {
        path: Path,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let source = serde_json::from_str::<i64>("not json").unwrap_err();
        let error = Error::Decode {
            path: Path::from("count"),
            source,
        };
        assert!(format!("{}", error).contains("'count'"));
    }
}
