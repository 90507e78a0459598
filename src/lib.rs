//! # QuadStore Core
//!
//! Context-partitioned triple storage for opaque identifier terms.
//!
//! A fact is a 3-tuple `(subject, predicate, object)`; every stored fact is
//! scoped to a named context, and the same fact may live in any number of
//! contexts at once. The store answers arbitrary bound/wildcard pattern
//! queries through auxiliary indexes, counts a single context exactly and the
//! whole store with cross-context deduplication, and keeps both consistent
//! under scoped and global removal.
//!
//! The crate provides:
//!
//! - [`QuadIndex`] - the single-writer core structure owning all quads
//! - [`TripleStore`] - a lock-guarded shared handle over a [`QuadIndex`]
//! - [`Graph`] and [`Dataset`] - thin context-bound and union views
//!
//! ## Examples
//!
//! ```rust
//! use quadstore_core::{QuadIndex, Triple, TriplePattern};
//!
//! let mut index = QuadIndex::new();
//! index.insert(Triple::new("tarek", "likes", "pizza"), "context-1");
//! index.insert(Triple::new("tarek", "likes", "pizza"), "context-2");
//!
//! // duplicates across contexts count once in the union view
//! assert_eq!(index.len(None), 1);
//! assert_eq!(index.len(Some(&"context-1")), 1);
//!
//! let found = index.triples(&TriplePattern::any(), None);
//! assert_eq!(found.len(), 1);
//! ```

pub mod graph;
pub mod index;
pub mod model;
pub mod store;

// Re-export core types for convenience
pub use graph::{Dataset, Graph};
pub use index::QuadIndex;
pub use model::{Quad, Term, TermPattern, Triple, TriplePattern};
pub use store::TripleStore;

/// Core error type for quad store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Store(String),
    #[error("Usage error: {0}")]
    Usage(String),
}

/// Result type alias for quad store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Version information for QuadStore Core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize QuadStore Core with default configuration
pub fn init() -> Result<()> {
    tracing::info!("Initializing quadstore-core v{}", VERSION);
    Ok(())
}
