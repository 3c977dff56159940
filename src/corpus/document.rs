//! Serde model of the corpus document.
//!
//! The document maps artist name -> song title -> song object. JSON objects are
//! read through [`OrderedEntries`] so the order of artists, songs and words in
//! the file survives parsing.

use super::CountTable;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// The entries of a JSON object, in document order.
///
/// A repeated key keeps the position of its first occurrence and the value of
/// its last one.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<V> OrderedEntries<V> {
    pub fn into_inner(self) -> Vec<(String, V)> {
        self.0
    }
}

struct OrderedEntriesVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntriesVisitor<V> {
    type Value = OrderedEntries<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        let mut positions: HashMap<String, usize> = HashMap::new();

        while let Some((key, value)) = access.next_entry::<String, V>()? {
            match positions.get(&key) {
                Some(&position) => entries[position].1 = value,
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Ok(OrderedEntries(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedEntriesVisitor {
            marker: PhantomData,
        })
    }
}

/// Upstream data ships word frequencies either as an object or as a list of
/// `[word, count]` pairs. Both describe the same table.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum WordFrequencyEncoding {
    Table(OrderedEntries<u64>),
    Pairs(Vec<(String, u64)>),
}

impl WordFrequencyEncoding {
    pub fn into_count_table(self) -> CountTable {
        match self {
            WordFrequencyEncoding::Table(entries) => entries.into_inner().into_iter().collect(),
            WordFrequencyEncoding::Pairs(pairs) => pairs.into_iter().collect(),
        }
    }
}

/// A song as it appears in the document. Both fields are required, they are
/// optional here only so that every missing field can be reported at once.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SongDocument {
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub word_frequency: Option<WordFrequencyEncoding>,
}

pub type ArtistDocument = OrderedEntries<SongDocument>;

pub type CorpusDocument = OrderedEntries<ArtistDocument>;
