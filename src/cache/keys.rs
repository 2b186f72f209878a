//! Cache key naming.

use std::fmt;

/// Slot name of the full property collection snapshot.
pub const ALL_PROPERTIES: &str = "all_properties";

/// A data-cache key, optionally namespaced by a prefix.
///
/// Renders as `name` or `prefix:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// The canonical slot for the whole property collection.
    pub fn all_properties(prefix: Option<&str>) -> Self {
        match prefix {
            Some(prefix) if !prefix.is_empty() => Self(format!("{prefix}:{ALL_PROPERTIES}")),
            _ => Self(ALL_PROPERTIES.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
