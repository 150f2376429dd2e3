//! Resolved partial fragments.

use std::collections::BTreeMap;

/// Resolved partial HTML keyed by lower-cased partial name.
///
/// Filled once before any page is compiled; every page referencing a
/// partial receives the same cached string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialCache {
    entries: BTreeMap<String, String>,
}

impl PartialCache {
    /// Store the resolved HTML of a partial.
    pub fn insert(&mut self, name: &str, html: String) {
        self.entries.insert(name.to_lowercase(), html);
    }

    /// Look up a partial by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut cache = PartialCache::default();
        cache.insert("Header", "<header></header>".to_owned());

        assert_eq!(cache.get("header"), Some("<header></header>"));
        assert_eq!(cache.get("HEADER"), Some("<header></header>"));
        assert_eq!(cache.get("footer"), None);
        assert_eq!(cache.len(), 1);
    }
}
