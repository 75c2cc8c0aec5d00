//! Lang editing operations
//!
//! Lookups are linear: tables are small and entry order must be preserved,
//! so no key index is kept alongside the entries.

use super::{LangEntry, LangFile};

/// Result of merging one table into another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Entries appended because their key was new
    pub added: usize,
    /// Existing entries whose value was replaced
    pub updated: usize,
    /// Existing entries left untouched
    pub skipped: usize,
}

impl LangFile {
    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in file order
    pub fn iter(&self) -> std::slice::Iter<'_, LangEntry> {
        self.entries.iter()
    }

    /// Iterate over the keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Value for `key`, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut LangEntry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Set the value for `key`
    ///
    /// An existing entry keeps its position; a new key is appended.
    ///
    /// # Returns
    /// The previous value if the key already existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.get_mut(&key) {
            Some(std::mem::replace(&mut entry.value, value))
        } else {
            self.entries.push(LangEntry { key, value });
            None
        }
    }

    /// Replace the value of an existing entry
    ///
    /// # Returns
    /// `true` if the entry was found and updated
    pub fn update(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.get_mut(key) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove an entry, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<LangEntry> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(pos))
    }

    /// Merge entries from another table
    ///
    /// New keys are appended in `other`'s order. Existing keys are replaced
    /// only when `overwrite` is set.
    pub fn merge(&mut self, other: &LangFile, overwrite: bool) -> MergeResult {
        let mut result = MergeResult::default();

        for entry in &other.entries {
            match self.get_mut(&entry.key) {
                Some(existing) if overwrite => {
                    existing.value.clone_from(&entry.value);
                    result.updated += 1;
                }
                Some(_) => result.skipped += 1,
                None => {
                    self.entries.push(entry.clone());
                    result.added += 1;
                }
            }
        }

        tracing::debug!(
            "Merged Lang tables: {} added, {} updated, {} skipped",
            result.added,
            result.updated,
            result.skipped
        );
        result
    }
}

impl<'a> IntoIterator for &'a LangFile {
    type Item = &'a LangEntry;
    type IntoIter = std::slice::Iter<'a, LangEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(pairs: &[(&str, &str)]) -> LangFile {
        let mut lang = LangFile::new();
        for (k, v) in pairs {
            lang.entries.push(LangEntry::new(*k, *v));
        }
        lang
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut lang = table(&[("a", "1"), ("b", "2")]);
        assert_eq!(lang.insert("a", "one"), Some("1".to_string()));
        assert_eq!(lang.insert("c", "3"), None);
        assert_eq!(lang.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(lang.get("a"), Some("one"));
    }

    #[test]
    fn test_update_and_remove() {
        let mut lang = table(&[("a", "1"), ("b", "2"), ("c", "3")]);
        assert!(lang.update("b", "two"));
        assert!(!lang.update("z", "none"));

        let removed = lang.remove("a").unwrap();
        assert_eq!(removed, LangEntry::new("a", "1"));
        assert!(lang.remove("a").is_none());
        assert_eq!(lang.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(lang.get("b"), Some("two"));
        assert_eq!(lang.len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut base = table(&[("a", "1"), ("b", "2")]);
        let other = table(&[("b", "deux"), ("c", "trois")]);

        let result = base.clone().merge(&other, false);
        assert_eq!(result, MergeResult { added: 1, updated: 0, skipped: 1 });

        let result = base.merge(&other, true);
        assert_eq!(result, MergeResult { added: 1, updated: 1, skipped: 0 });
        assert_eq!(base, table(&[("a", "1"), ("b", "deux"), ("c", "trois")]));
    }

    #[test]
    fn test_empty() {
        let lang = LangFile::new();
        assert!(lang.is_empty());
        assert!(!lang.contains_key("a"));
        assert_eq!(lang.iter().count(), 0);
    }
}
