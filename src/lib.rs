//! Cinegraph
//!
//! A film knowledge-graph materializer. Two tabular datasets, movies and
//! their credits, are joined and turned into a typed RDF graph: stable
//! deterministic IRIs for every movie, person, genre, keyword, company,
//! country and language; per-appearance cast and crew nodes; and a closed
//! taxonomy of canonical crew roles resolved from free-text job titles.
//! The graph extends a base Turtle schema and is serialized back to
//! Turtle in one terminal step.
//!
//! # Architecture
//!
//! - [`rdf`]: term wrappers over oxrdf, the in-memory triple store, the
//!   Turtle codec, and the film-rating vocabulary.
//! - [`ingest`]: the pipeline. CSV tables and their inner join, fail-soft
//!   nested-record parsing, the identifier scheme, the role canonicalizer,
//!   and the graph materializer.
//! - [`queries`]: the read-only analytical battery with per-query timing.
//! - [`report`]: descriptive statistics over the raw tables.
//!
//! The pipeline is single-threaded and synchronous: rows are processed
//! strictly sequentially against one exclusively owned store, whose merge
//! semantics (idempotent insert) make re-processing a row a no-op.
//!
//! # Example
//!
//! ```rust
//! use cinegraph::ingest::GraphMaterializer;
//! use cinegraph::rdf::TripleStore;
//!
//! let mut store = TripleStore::new();
//! let mut materializer = GraphMaterializer::new(&mut store).unwrap();
//! materializer.declare_role_types().unwrap();
//! materializer.materialize(&[]).unwrap();
//! // Role taxonomy individuals are declared even on an empty input.
//! assert!(!store.is_empty());
//! ```

#![warn(clippy::all)]

pub mod ingest;
pub mod queries;
pub mod rdf;
pub mod report;

pub use ingest::{canonicalize, CanonicalRole, GraphMaterializer, MaterializeStats};
pub use rdf::{Literal, NamedNode, Object, Predicate, Subject, Triple, TriplePattern, TripleStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
