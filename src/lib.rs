//! cardex - resolve free-form queries to canonical catalog names.
//!
//! Given a fixed catalog of known names and a curated nickname table, the
//! engine turns typo-laden, abbreviated, or partially remembered input
//! ("Ashenmmor", "Jeskai Asc", "bob") into a best match plus a ranked
//! list of plausible candidates, via an alias -> exact -> prefix -> stem
//! -> fuzzy cascade over an immutable, atomically swappable index.

pub mod candidate;
pub mod indexer;
pub mod models;
pub mod normalize;
pub mod ranking;
pub mod search;
mod store;

pub use candidate::MatchStrategy;
pub use indexer::{Index, IndexError};
pub use models::{Alias, CatalogEntry};
pub use search::SearchResult;
pub use store::Searcher;
