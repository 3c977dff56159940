//! The interaction surface consumed by renderers.
//!
//! A [`DashboardState`] holds the current artist selection and search term.
//! Rendering it against the corpus produces plain data: the ranked chart, the
//! statistics block and whether the search control should be visible. Query
//! errors never escape from here; they turn into an empty chart or missing
//! statistics so the session stays usable.

use crate::corpus::Corpus;
use crate::query::{
    query, ArtistSelector, ChartAxis, QueryError, SearchTerm, WordChart, DEFAULT_SEARCH_TERM,
};
use crate::stats::{artist_stats, ArtistStats};
use serde::Serialize;
use tracing::warn;

pub const DEFAULT_ALL_ARTISTS_LABEL: &str = "All artists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub all_artists_label: String,
    pub default_search_term: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            all_artists_label: DEFAULT_ALL_ARTISTS_LABEL.to_owned(),
            default_search_term: DEFAULT_SEARCH_TERM.to_owned(),
        }
    }
}

/// Outcome of a render, used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Ok,
    Degraded,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DashboardView {
    /// The dropdown label of the current selection.
    pub selection: String,

    /// The search control only applies to the all-artists view.
    pub search_visible: bool,

    pub chart: WordChart,
    pub stats: Option<ArtistStats>,

    #[serde(skip)]
    pub outcome: RenderOutcome,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ArtistOptions {
    pub options: Vec<String>,
    pub default: String,
}

/// Dropdown entries: every artist in corpus order, then the all-artists entry.
pub fn artist_options(corpus: &Corpus, settings: &DashboardSettings) -> ArtistOptions {
    let mut options: Vec<String> = corpus.iter_artists().map(|a| a.name.clone()).collect();
    options.push(settings.all_artists_label.clone());
    ArtistOptions {
        options,
        default: settings.all_artists_label.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    selector: ArtistSelector,
    search_term: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        DashboardState {
            selector: ArtistSelector::AllArtists,
            search_term: None,
        }
    }
}

impl DashboardState {
    pub fn new(selector: ArtistSelector, search_term: Option<String>) -> DashboardState {
        DashboardState {
            selector,
            search_term,
        }
    }

    /// Builds a state from raw dropdown/input values. A missing artist label
    /// means the all-artists entry.
    pub fn from_labels(
        artist_label: Option<&str>,
        search_term: Option<&str>,
        settings: &DashboardSettings,
    ) -> DashboardState {
        let selector = match artist_label {
            Some(label) => ArtistSelector::from_label(label, &settings.all_artists_label),
            None => ArtistSelector::AllArtists,
        };
        DashboardState::new(selector, search_term.map(str::to_owned))
    }

    pub fn selector(&self) -> &ArtistSelector {
        &self.selector
    }

    pub fn select_artist(&mut self, label: &str, settings: &DashboardSettings) {
        self.selector = ArtistSelector::from_label(label, &settings.all_artists_label);
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = Some(term.to_owned());
    }

    pub fn search_visible(&self) -> bool {
        self.selector.is_all_artists()
    }

    pub fn render(&self, corpus: &Corpus, settings: &DashboardSettings) -> DashboardView {
        let term = SearchTerm::new(self.search_term.as_deref(), &settings.default_search_term);
        let mut outcome = RenderOutcome::Ok;

        let chart = query(corpus, &self.selector, &term).unwrap_or_else(|err| {
            self.log_degraded("chart", &err);
            outcome = RenderOutcome::Degraded;
            WordChart::empty(self.chart_axis())
        });

        let stats = artist_stats(corpus, &self.selector).unwrap_or_else(|err| {
            self.log_degraded("stats", &err);
            outcome = RenderOutcome::Degraded;
            None
        });

        DashboardView {
            selection: self.selector.label(&settings.all_artists_label).to_owned(),
            search_visible: self.search_visible(),
            chart,
            stats,
            outcome,
        }
    }

    fn chart_axis(&self) -> ChartAxis {
        if self.selector.is_all_artists() {
            ChartAxis::Artist
        } else {
            ChartAxis::Word
        }
    }

    fn log_degraded(&self, what: &str, err: &QueryError) {
        warn!("Serving empty {} for {:?}: {}", what, self.selector, err);
    }
}
