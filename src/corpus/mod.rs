mod artist;
mod corpus;
mod count_table;
mod cross_artist;
pub mod document;
mod error;
mod load;
mod song;

pub use artist::Artist;
pub use corpus::Corpus;
pub use count_table::CountTable;
pub use cross_artist::CrossArtistTable;
pub use error::{CorpusLoadError, Problem as LoadCorpusProblem};
pub use load::{initialize_corpus, load_corpus};
pub use song::Song;
