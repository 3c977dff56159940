use super::CountTable;
use std::collections::HashMap;

/// Word -> artist -> occurrences. One level of aggregation above the
/// per-artist tables: it answers "which artists use this word, and how much".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrossArtistTable {
    words: Vec<String>,
    by_word: HashMap<String, CountTable>,
}

impl CrossArtistTable {
    pub fn new() -> CrossArtistTable {
        CrossArtistTable::default()
    }

    /// Adds to the occurrences of `word` by `artist`. `None` on overflow,
    /// see [`CountTable::add`].
    pub fn add(&mut self, word: &str, artist: &str, count: u64) -> Option<u64> {
        match self.by_word.get_mut(word) {
            Some(artists) => artists.add(artist, count),
            None => {
                let mut artists = CountTable::new();
                artists.add(artist, count);
                self.words.push(word.to_owned());
                self.by_word.insert(word.to_owned(), artists);
                Some(count)
            }
        }
    }

    /// Per-artist occurrences of `word`, `None` when no artist uses it.
    pub fn get(&self, word: &str) -> Option<&CountTable> {
        self.by_word.get(word)
    }

    pub fn occurrences(&self, word: &str, artist: &str) -> u64 {
        self.get(word).map(|artists| artists.get(artist)).unwrap_or(0)
    }

    /// Number of distinct words across the whole corpus.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountTable)> {
        self.words
            .iter()
            .filter_map(move |word| self.by_word.get(word).map(|t| (word.as_str(), t)))
    }
}
