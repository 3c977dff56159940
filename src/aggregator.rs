//! One-time aggregation of the loaded corpus.
//!
//! Folds every song's word table into its artist's table, then builds the
//! cross-artist table (word -> artist -> occurrences) from the artist tables.
//! Tables are always rebuilt from empty accumulators, so running the step
//! again on the same corpus yields the same values.

use crate::corpus::{Artist, CountTable, Corpus, CrossArtistTable};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Corpus has no artists")]
    EmptyCorpus,

    #[error("Occurrences of \"{word}\" for artist \"{artist}\" do not fit in a 64-bit count")]
    CountOverflow { artist: String, word: String },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AggregationSummary {
    pub artists: usize,
    pub songs: usize,
    pub words: usize,
}

impl From<&Corpus> for AggregationSummary {
    fn from(corpus: &Corpus) -> Self {
        AggregationSummary {
            artists: corpus.get_artists_count(),
            songs: corpus.get_songs_count(),
            words: corpus.get_words_count(),
        }
    }
}

fn overflow(artist: &str, word: &str) -> AggregationError {
    AggregationError::CountOverflow {
        artist: artist.to_owned(),
        word: word.to_owned(),
    }
}

fn fold_songs(artist: &Artist) -> Result<CountTable, AggregationError> {
    let mut totals = CountTable::new();
    for song in artist.songs.iter() {
        for (word, count) in song.word_frequency.iter() {
            totals
                .add(word, count)
                .ok_or_else(|| overflow(&artist.name, word))?;
        }
    }
    Ok(totals)
}

/// Augments `corpus` in place with per-artist totals and the cross-artist table.
pub fn aggregate(corpus: &mut Corpus) -> Result<AggregationSummary, AggregationError> {
    if corpus.get_artists_count() == 0 {
        return Err(AggregationError::EmptyCorpus);
    }

    // Nothing is written back until every table folded without overflow.
    let artist_totals = corpus
        .iter_artists()
        .map(fold_songs)
        .collect::<Result<Vec<CountTable>, AggregationError>>()?;

    let mut cross_artist = CrossArtistTable::new();
    for (artist, totals) in corpus.iter_artists().zip(artist_totals.iter()) {
        for (word, count) in totals.iter() {
            cross_artist
                .add(word, &artist.name, count)
                .ok_or_else(|| overflow(&artist.name, word))?;
        }
    }

    for (artist, totals) in corpus.artists_mut().iter_mut().zip(artist_totals) {
        artist.word_frequency = totals;
    }
    corpus.set_cross_artist_table(cross_artist);

    let summary = AggregationSummary::from(&*corpus);
    info!(
        "Aggregated {} artists, {} songs, {} distinct words",
        summary.artists, summary.songs, summary.words
    );
    Ok(summary)
}
