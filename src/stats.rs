//! Descriptive statistics for a single artist.

use crate::corpus::{Artist, Corpus};
use crate::query::{ArtistSelector, CorpusView, QueryError};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ArtistStats {
    pub artist: String,
    pub total_word_count: u64,
    pub unique_word_count: usize,
    pub total_song_count: usize,
    pub average_words_per_song: f64,

    /// Mean length in characters of the distinct words, each word counted once.
    pub average_word_length: f64,

    /// Mean number of distinct whitespace-delimited tokens in the raw lyrics.
    pub average_unique_words_per_song: f64,
}

impl ArtistStats {
    /// Human readable label/value pairs, values rounded to two decimals.
    pub fn labeled_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total words", self.total_word_count.to_string()),
            ("Unique words", self.unique_word_count.to_string()),
            ("Total songs", self.total_song_count.to_string()),
            (
                "Average words per song",
                format!("{:.2}", self.average_words_per_song),
            ),
            (
                "Average word length",
                format!("{:.2} letters", self.average_word_length),
            ),
            (
                "Average unique words per song",
                format!("{:.2}", self.average_unique_words_per_song),
            ),
        ]
    }
}

fn compute(artist: &Artist) -> Result<ArtistStats, QueryError> {
    let total_song_count = artist.song_count();
    if total_song_count == 0 {
        return Err(QueryError::NoSongs(artist.name.clone()));
    }

    let words = &artist.word_frequency;
    let total_word_count = words.total();
    let unique_word_count = words.len();

    let average_word_length = if unique_word_count == 0 {
        0.0
    } else {
        let letters: usize = words.keys().map(|w| w.chars().count()).sum();
        letters as f64 / unique_word_count as f64
    };

    let unique_tokens: usize = artist.songs.iter().map(|s| s.distinct_lyrics_tokens()).sum();

    Ok(ArtistStats {
        artist: artist.name.clone(),
        total_word_count,
        unique_word_count,
        total_song_count,
        average_words_per_song: total_word_count as f64 / total_song_count as f64,
        average_word_length,
        average_unique_words_per_song: unique_tokens as f64 / total_song_count as f64,
    })
}

/// Statistics for the selected artist. The all-artists selection has no
/// statistics and yields `Ok(None)`.
pub fn artist_stats(
    corpus: &Corpus,
    selector: &ArtistSelector,
) -> Result<Option<ArtistStats>, QueryError> {
    match CorpusView::select(corpus, selector)? {
        CorpusView::CrossArtist(_) => Ok(None),
        CorpusView::PerArtist(artist) => compute(artist).map(Some),
    }
}
