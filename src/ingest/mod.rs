//! Ingestion pipeline: CSV tables -> typed records -> graph triples
//!
//! The flow is strictly sequential: rows are joined, parsed at the
//! boundary into typed records, keyed through the identifier scheme, and
//! emitted into the one shared store by the materializer. Crew credits
//! additionally pass through the role canonicalizer.

pub mod ids;
pub mod materializer;
pub mod record;
pub mod roles;
pub mod tables;

pub use materializer::{GraphMaterializer, MaterializeStats};
pub use roles::{canonicalize, CanonicalRole};
pub use tables::{join, load_credits, load_movies, JoinedRow, TableError};
