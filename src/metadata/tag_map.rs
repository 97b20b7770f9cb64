use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping of display label → display value.
///
/// Iteration follows insertion order, which is file order. Labels are
/// unique: inserting an existing label replaces its value but keeps the
/// position it was first seen at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TagMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. Returns the previous value, if any.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let label = label.into();
        let value = value.into();

        if let Some(&pos) = self.index.get(&label) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }

        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, value));
        None
    }

    /// Look up the value for `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.index
            .get(label)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Whether `label` is present.
    pub fn contains_key(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(label, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
