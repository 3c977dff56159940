use super::document::{CorpusDocument, SongDocument};
use super::{Artist, CorpusLoadError, CrossArtistTable, LoadCorpusProblem, Song};
use std::collections::HashMap;

/// Artists with their songs, plus the derived aggregates.
///
/// The corpus is built once, aggregated once (see [`crate::aggregator`]) and
/// then only read.
#[derive(Debug, Clone)]
pub struct Corpus {
    artists: Vec<Artist>,
    artists_index: HashMap<String, usize>,
    cross_artist: CrossArtistTable,
    aggregated: bool,
}

fn build_song(
    artist: &str,
    title: String,
    document: SongDocument,
    problems: &mut Vec<LoadCorpusProblem>,
) -> Option<Song> {
    if document.lyrics.is_none() {
        problems.push(LoadCorpusProblem::MissingLyrics {
            artist: artist.to_owned(),
            song: title.clone(),
        });
    }
    if document.word_frequency.is_none() {
        problems.push(LoadCorpusProblem::MissingWordFrequency {
            artist: artist.to_owned(),
            song: title.clone(),
        });
    }

    match (document.lyrics, document.word_frequency) {
        (Some(lyrics), Some(word_frequency)) => Some(Song {
            title,
            lyrics,
            word_frequency: word_frequency.into_count_table(),
        }),
        _ => None,
    }
}

impl Corpus {
    /// Artists keep the given order. A repeated name replaces the earlier
    /// artist in place.
    pub fn new(artists: Vec<Artist>) -> Corpus {
        let mut ordered: Vec<Artist> = Vec::with_capacity(artists.len());
        let mut artists_index: HashMap<String, usize> = HashMap::new();
        for artist in artists {
            match artists_index.get(&artist.name) {
                Some(&position) => ordered[position] = artist,
                None => {
                    artists_index.insert(artist.name.clone(), ordered.len());
                    ordered.push(artist);
                }
            }
        }

        Corpus {
            artists: ordered,
            artists_index,
            cross_artist: CrossArtistTable::new(),
            aggregated: false,
        }
    }

    /// Builds the corpus from a parsed document, normalizing both word
    /// frequency encodings into tables. Every song missing a required field
    /// is reported before failing.
    pub fn from_document(document: CorpusDocument) -> Result<Corpus, CorpusLoadError> {
        let mut problems: Vec<LoadCorpusProblem> = vec![];
        let mut artists: Vec<Artist> = vec![];

        for (artist_name, songs_document) in document.into_inner() {
            let songs: Vec<Song> = songs_document
                .into_inner()
                .into_iter()
                .filter_map(|(title, song)| build_song(&artist_name, title, song, &mut problems))
                .collect();
            artists.push(Artist::new(artist_name, songs));
        }

        if !problems.is_empty() {
            return Err(CorpusLoadError::InvalidSongs(problems));
        }
        Ok(Corpus::new(artists))
    }

    pub fn from_json_str(s: &str) -> Result<Corpus, CorpusLoadError> {
        let document: CorpusDocument = serde_json::from_str(s)?;
        Corpus::from_document(document)
    }

    pub fn get_artist(&self, name: &str) -> Option<&Artist> {
        self.artists_index.get(name).map(|&i| &self.artists[i])
    }

    /// Artists in document order.
    pub fn iter_artists(&self) -> impl Iterator<Item = &Artist> {
        self.artists.iter()
    }

    pub fn get_artists_count(&self) -> usize {
        self.artists.len()
    }

    pub fn get_songs_count(&self) -> usize {
        self.artists.iter().map(Artist::song_count).sum()
    }

    /// Distinct words across all artists. Zero before aggregation.
    pub fn get_words_count(&self) -> usize {
        self.cross_artist.len()
    }

    pub fn cross_artist_table(&self) -> &CrossArtistTable {
        &self.cross_artist
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregated
    }

    pub(crate) fn artists_mut(&mut self) -> &mut [Artist] {
        &mut self.artists
    }

    pub(crate) fn set_cross_artist_table(&mut self, table: CrossArtistTable) {
        self.cross_artist = table;
        self.aggregated = true;
    }
}
