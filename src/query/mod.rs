mod chart;
mod selector;

pub use chart::{query, ChartAxis, ChartEntry, WordChart, MAX_CHART_ENTRIES, VALUE_AXIS_TITLE};
pub use selector::{ArtistSelector, CorpusView, CrossArtistView, SearchTerm, DEFAULT_SEARCH_TERM};

use thiserror::Error;

/// Per-query failures. None of them is fatal: callers are expected to fall
/// back to an empty result and keep serving.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown artist \"{0}\"")]
    UnknownArtist(String),

    #[error("Artist \"{0}\" has no songs")]
    NoSongs(String),

    #[error("Corpus was not aggregated yet")]
    NotAggregated,
}
