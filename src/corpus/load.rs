//! Corpus loading and the one-time startup initialization.

use super::{Corpus, CorpusLoadError};
use crate::aggregator::aggregate;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus, CorpusLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CorpusLoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    match Corpus::from_json_str(&text) {
        Ok(corpus) => {
            info!(
                "Corpus has:\n{} artists\n{} songs",
                corpus.get_artists_count(),
                corpus.get_songs_count()
            );
            Ok(corpus)
        }
        Err(CorpusLoadError::InvalidSongs(problems)) => {
            warn!("Found {} problems:", problems.len());
            for problem in problems.iter() {
                warn!("- {:?}", problem);
            }
            warn!(
                "Check the {} problems above, the corpus could not be initialized.",
                problems.len()
            );
            Err(CorpusLoadError::InvalidSongs(problems))
        }
        Err(err) => Err(err),
    }
}

/// Loads the corpus and runs the aggregation step. Any failure here is
/// meant to abort startup.
pub fn initialize_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let path = path.as_ref();
    let mut corpus =
        load_corpus(path).with_context(|| format!("Could not load corpus at {:?}", path))?;
    aggregate(&mut corpus).with_context(|| format!("Could not aggregate corpus at {:?}", path))?;
    Ok(corpus)
}
