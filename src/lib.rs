//! Lyrics Stats Server Library
//!
//! Word-frequency aggregation over a song-lyrics corpus, with the chart and
//! statistics queries behind the dashboard. Exposed for the binaries and the
//! end-to-end tests.

pub mod aggregator;
pub mod config;
pub mod corpus;
pub mod dashboard;
pub mod query;
pub mod server;
pub mod stats;

// Re-export commonly used types for convenience
pub use aggregator::{aggregate, AggregationError, AggregationSummary};
pub use corpus::{initialize_corpus, load_corpus, Corpus};
pub use dashboard::{DashboardSettings, DashboardState, DashboardView};
pub use query::{query, ArtistSelector, QueryError, SearchTerm};
pub use server::{run_server, RequestsLoggingLevel};
pub use stats::{artist_stats, ArtistStats};
