use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A key -> count table that remembers the order in which keys were first seen.
///
/// Used both for word -> occurrences tables (songs and artists) and for
/// artist -> occurrences tables (the cross-artist view). Ranking later relies
/// on the insertion order to break ties deterministically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountTable {
    keys: Vec<String>,
    counts: HashMap<String, u64>,
}

impl CountTable {
    pub fn new() -> CountTable {
        CountTable::default()
    }

    /// Adds `count` to the value stored for `key`, starting from zero for
    /// keys that are not in the table yet. Returns the new value, or `None`
    /// if it does not fit in a `u64`, in which case the table is unchanged.
    pub fn add(&mut self, key: &str, count: u64) -> Option<u64> {
        match self.counts.get_mut(key) {
            Some(current) => {
                *current = current.checked_add(count)?;
                Some(*current)
            }
            None => {
                self.keys.push(key.to_owned());
                self.counts.insert(key.to_owned(), count);
                Some(count)
            }
        }
    }

    /// Overwrites the value for `key`. An existing key keeps its position.
    pub fn set(&mut self, key: &str, count: u64) {
        match self.counts.get_mut(key) {
            Some(current) => *current = count,
            None => {
                self.keys.push(key.to_owned());
                self.counts.insert(key.to_owned(), count);
            }
        }
    }

    /// Count for `key`, 0 when absent.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sum of every count in the table, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Iterates entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.keys
            .iter()
            .map(move |key| (key.as_str(), self.counts.get(key).copied().unwrap_or(0)))
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for CountTable {
    /// Builds a table with last-wins semantics for repeated keys.
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = CountTable::new();
        for (key, count) in iter {
            table.set(key.as_ref(), count);
        }
        table
    }
}

impl Serialize for CountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, count) in self.iter() {
            map.serialize_entry(key, &count)?;
        }
        map.end()
    }
}
