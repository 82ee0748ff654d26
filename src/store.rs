//! Searcher facade: the current-index holder.
//!
//! Concurrency model: a query is a pure computation over one immutable
//! [`Index`] snapshot, so any number of threads may search concurrently
//! with no locking beyond a brief `Arc` clone. The only mutable shared
//! state is the current-index pointer; [`Searcher::rebuild`] constructs
//! the replacement off-lock and swaps it in wholesale, so readers observe
//! either the old or the new index in full, never a mix.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::indexer::{Index, IndexError};
use crate::models::{Alias, CatalogEntry};
use crate::search::{run_query, SearchResult};

/// Thread-safe resolver over a swappable catalog index.
pub struct Searcher {
    index: RwLock<Arc<Index>>,
}

impl Searcher {
    /// Build the initial index from a catalog + alias snapshot.
    pub fn new(catalog: &[CatalogEntry], aliases: &[Alias]) -> Result<Self, IndexError> {
        let index = Index::build(catalog, aliases)?;
        Ok(Self { index: RwLock::new(Arc::new(index)) })
    }

    /// Resolve a query against the current index snapshot.
    pub fn search(&self, query: &str) -> SearchResult {
        let index = Arc::clone(&self.index.read());

        #[cfg(feature = "perf-log")]
        let t0 = std::time::Instant::now();

        let result = run_query(&index, query);

        #[cfg(feature = "perf-log")]
        eprintln!(
            "[perf] query={:?} matches={} took={:.2}ms",
            query,
            result.all_matches().len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );

        result
    }

    /// Build a fresh index from new catalog + alias data and install it
    /// atomically. On failure the previous index stays in service.
    pub fn rebuild(&self, catalog: &[CatalogEntry], aliases: &[Alias]) -> Result<(), IndexError> {
        let fresh = Arc::new(Index::build(catalog, aliases)?);
        *self.index.write() = fresh;
        Ok(())
    }

    /// The current index snapshot. Queries in flight keep whatever
    /// snapshot they started with across a concurrent rebuild.
    pub fn snapshot(&self) -> Arc<Index> {
        Arc::clone(&self.index.read())
    }
}
