use std::path::PathBuf;
use thiserror::Error;

/// A structural problem found in a single song while building the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    MissingLyrics { artist: String, song: String },
    MissingWordFrequency { artist: String, song: String },
}

#[derive(Debug, Error)]
pub enum CorpusLoadError {
    #[error("Could not read corpus at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed corpus document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Corpus has {} problems in its songs", .0.len())]
    InvalidSongs(Vec<Problem>),
}
