use super::QueryError;
use crate::corpus::{Artist, Corpus};
use std::fmt;

/// The search term used when the user has not typed one.
pub const DEFAULT_SEARCH_TERM: &str = "ja";

/// What the user picked in the artist dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtistSelector {
    AllArtists,
    Artist(String),
}

impl ArtistSelector {
    /// Maps a dropdown label to a selector. The all-artists label always picks
    /// the cross-artist view, even if an artist happens to share that name.
    pub fn from_label(label: &str, all_artists_label: &str) -> ArtistSelector {
        if label == all_artists_label {
            ArtistSelector::AllArtists
        } else {
            ArtistSelector::Artist(label.to_owned())
        }
    }

    pub fn label<'a>(&'a self, all_artists_label: &'a str) -> &'a str {
        match self {
            ArtistSelector::AllArtists => all_artists_label,
            ArtistSelector::Artist(name) => name,
        }
    }

    pub fn is_all_artists(&self) -> bool {
        matches!(self, ArtistSelector::AllArtists)
    }
}

/// A normalized search term: trimmed and lowercased, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: Option<&str>, fallback: &str) -> SearchTerm {
        let normalized = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        if normalized.is_empty() {
            SearchTerm(fallback.trim().to_lowercase())
        } else {
            SearchTerm(normalized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SearchTerm {
    fn default() -> Self {
        SearchTerm(DEFAULT_SEARCH_TERM.to_owned())
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cross-artist side of the corpus: every real artist together with the
/// word -> artist -> occurrences table.
#[derive(Debug, Clone, Copy)]
pub struct CrossArtistView<'a> {
    corpus: &'a Corpus,
}

impl<'a> CrossArtistView<'a> {
    pub fn artists(&self) -> impl Iterator<Item = &'a Artist> {
        self.corpus.iter_artists()
    }

    pub fn occurrences(&self, word: &str, artist: &str) -> u64 {
        self.corpus.cross_artist_table().occurrences(word, artist)
    }
}

/// The two shapes a selection can resolve to. Queries branch on this tag and
/// never on the selector string.
#[derive(Debug, Clone, Copy)]
pub enum CorpusView<'a> {
    PerArtist(&'a Artist),
    CrossArtist(CrossArtistView<'a>),
}

impl<'a> CorpusView<'a> {
    pub fn select(corpus: &'a Corpus, selector: &ArtistSelector) -> Result<Self, QueryError> {
        if !corpus.is_aggregated() {
            return Err(QueryError::NotAggregated);
        }
        match selector {
            ArtistSelector::AllArtists => Ok(CorpusView::CrossArtist(CrossArtistView { corpus })),
            ArtistSelector::Artist(name) => corpus
                .get_artist(name)
                .map(CorpusView::PerArtist)
                .ok_or_else(|| QueryError::UnknownArtist(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;

    #[test]
    fn maps_labels_to_selectors() {
        assert_eq!(
            ArtistSelector::from_label("All artists", "All artists"),
            ArtistSelector::AllArtists
        );
        assert_eq!(
            ArtistSelector::from_label("ArtistX", "All artists"),
            ArtistSelector::Artist("ArtistX".to_owned())
        );
        assert_eq!(ArtistSelector::AllArtists.label("Everyone"), "Everyone");
        assert_eq!(
            ArtistSelector::Artist("ArtistX".to_owned()).label("Everyone"),
            "ArtistX"
        );
    }

    #[test]
    fn normalizes_search_terms() {
        assert_eq!(SearchTerm::new(Some("  Polska "), "ja").as_str(), "polska");
        assert_eq!(SearchTerm::new(Some(""), "ja").as_str(), "ja");
        assert_eq!(SearchTerm::new(Some("   "), "ja").as_str(), "ja");
        assert_eq!(SearchTerm::new(None, "JA").as_str(), "ja");
        assert_eq!(SearchTerm::default().as_str(), DEFAULT_SEARCH_TERM);
    }

    #[test]
    fn selects_view_by_tag() {
        let mut corpus = Corpus::from_json_str(
            r#"{ "A": { "S": { "lyrics": "x", "word_frequency": { "x": 1 } } } }"#,
        )
        .unwrap();
        assert!(matches!(
            CorpusView::select(&corpus, &ArtistSelector::AllArtists),
            Err(QueryError::NotAggregated)
        ));

        aggregate(&mut corpus).unwrap();

        assert!(matches!(
            CorpusView::select(&corpus, &ArtistSelector::AllArtists),
            Ok(CorpusView::CrossArtist(_))
        ));
        match CorpusView::select(&corpus, &ArtistSelector::Artist("A".to_owned())) {
            Ok(CorpusView::PerArtist(artist)) => assert_eq!(artist.name, "A"),
            other => panic!("Expected per-artist view, got {:?}", other),
        }
        assert_eq!(
            CorpusView::select(&corpus, &ArtistSelector::Artist("B".to_owned())).err(),
            Some(QueryError::UnknownArtist("B".to_owned()))
        );
    }
}
