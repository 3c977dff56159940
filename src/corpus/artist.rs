use super::{CountTable, Song};
use serde::Serialize;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Artist {
    pub name: String,
    pub songs: Vec<Song>,

    /// Occurrences of each word summed over every song of the artist.
    /// Empty until the corpus is aggregated.
    pub word_frequency: CountTable,
}

impl Artist {
    pub fn new(name: String, songs: Vec<Song>) -> Artist {
        Artist {
            name,
            songs,
            word_frequency: CountTable::new(),
        }
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn get_song(&self, title: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.title == title)
    }
}
