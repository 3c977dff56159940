use super::{ArtistSelector, CorpusView, CrossArtistView, QueryError, SearchTerm};
use crate::corpus::{Artist, Corpus};
use serde::Serialize;

/// Charts never show more than this many bars.
pub const MAX_CHART_ENTRIES: usize = 30;

pub const VALUE_AXIS_TITLE: &str = "Average occurrences per song";

/// What the bar labels are.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartAxis {
    Artist,
    Word,
}

impl ChartAxis {
    pub fn title(&self) -> &'static str {
        match self {
            ChartAxis::Artist => "Artist",
            ChartAxis::Word => "Word",
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WordChart {
    pub axis: ChartAxis,
    pub axis_title: &'static str,
    pub value_axis_title: &'static str,

    /// The term the chart was computed for, `None` when the view ignores it.
    pub search_term: Option<String>,
    pub entries: Vec<ChartEntry>,
}

impl WordChart {
    fn new(axis: ChartAxis, search_term: Option<String>, entries: Vec<ChartEntry>) -> WordChart {
        WordChart {
            axis,
            axis_title: axis.title(),
            value_axis_title: VALUE_AXIS_TITLE,
            search_term,
            entries,
        }
    }

    pub fn empty(axis: ChartAxis) -> WordChart {
        WordChart::new(axis, None, vec![])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sorts by value, highest first, and keeps the top entries. The sort is
/// stable, so equal values stay in the order they were produced.
fn rank(mut entries: Vec<ChartEntry>) -> Vec<ChartEntry> {
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(MAX_CHART_ENTRIES);
    entries
}

/// Average occurrences of `term` per song, for every artist that has songs.
fn cross_artist_entries(view: CrossArtistView<'_>, term: &SearchTerm) -> Vec<ChartEntry> {
    view.artists()
        .filter(|artist| artist.song_count() > 0)
        .map(|artist| ChartEntry {
            label: artist.name.clone(),
            value: view.occurrences(term.as_str(), &artist.name) as f64
                / artist.song_count() as f64,
        })
        .collect()
}

/// Average occurrences per song of every word the artist used.
fn per_artist_entries(artist: &Artist) -> Vec<ChartEntry> {
    let songs = artist.song_count();
    if songs == 0 {
        return vec![];
    }
    artist
        .word_frequency
        .iter()
        .map(|(word, count)| ChartEntry {
            label: word.to_owned(),
            value: count as f64 / songs as f64,
        })
        .collect()
}

/// Computes the ranked bar chart for a selection.
///
/// With the all-artists selection the bars are artists and `search_term`
/// decides which word is counted. With a concrete artist the bars are that
/// artist's words and `search_term` is not used.
pub fn query(
    corpus: &Corpus,
    selector: &ArtistSelector,
    search_term: &SearchTerm,
) -> Result<WordChart, QueryError> {
    let chart = match CorpusView::select(corpus, selector)? {
        CorpusView::CrossArtist(view) => WordChart::new(
            ChartAxis::Artist,
            Some(search_term.as_str().to_owned()),
            rank(cross_artist_entries(view, search_term)),
        ),
        CorpusView::PerArtist(artist) => {
            WordChart::new(ChartAxis::Word, None, rank(per_artist_entries(artist)))
        }
    };
    Ok(chart)
}
