//! Shared constants for end-to-end tests
//!
//! When the fixture corpus changes, update only this file and `fixtures.rs`.

// ============================================================================
// Fixture Corpus
// ============================================================================

/// Two songs, six counted words, four distinct words.
pub const ARTIST_1_NAME: &str = "ArtistX";

/// One song that says "ja" twice.
pub const ARTIST_2_NAME: &str = "Zespół Testowy";

/// Present in the corpus but without songs.
pub const SILENT_ARTIST_NAME: &str = "Silent";

pub const ARTISTS_COUNT: usize = 3;
pub const SONGS_COUNT: usize = 3;
pub const DISTINCT_WORDS_COUNT: usize = 6;

pub const ALL_ARTISTS_LABEL: &str = "All artists";
pub const DEFAULT_SEARCH_TERM: &str = "ja";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to answer its first request
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout for a single request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
