use super::CountTable;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Song {
    pub title: String,
    pub lyrics: String,
    pub word_frequency: CountTable,
}

impl Song {
    /// Number of distinct whitespace-delimited tokens in the raw lyrics.
    ///
    /// Computed from `lyrics` alone, so it can disagree with `word_frequency`
    /// when the two were produced by different upstream tokenizers.
    pub fn distinct_lyrics_tokens(&self) -> usize {
        self.lyrics.split_whitespace().collect::<HashSet<&str>>().len()
    }
}
