//! Test fixture creation
//!
//! Writes the corpus document every end-to-end test runs against.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Songs mix both word frequency encodings.
const FIXTURE_CORPUS: &str = r#"
{
    "ArtistX": {
        "Song1": {
            "lyrics": "i love rap",
            "word_frequency": { "i": 1, "love": 1, "rap": 1 }
        },
        "Song2": {
            "lyrics": "i love music",
            "word_frequency": [["i", 1], ["love", 1], ["music", 1]]
        }
    },
    "Zespół Testowy": {
        "Piosenka": {
            "lyrics": "ja ja ty",
            "word_frequency": { "ja": 2, "ty": 1 }
        }
    },
    "Silent": {}
}
"#;

/// Creates a temporary directory holding `corpus.json`.
///
/// The directory is deleted when the returned `TempDir` is dropped.
pub fn create_test_corpus() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("corpus.json");
    std::fs::write(&path, FIXTURE_CORPUS)?;
    Ok((dir, path))
}
