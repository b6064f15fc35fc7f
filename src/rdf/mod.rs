//! RDF layer: terms, triple store, Turtle I/O, film-rating vocabulary
//!
//! The store is the one shared mutable resource of a run: the materializer
//! owns it exclusively while building, then read-only consumers (Turtle
//! serialization, the query battery) take it by shared reference.

mod store;
mod types;
pub mod turtle;
pub mod vocab;

pub use store::TripleStore;
pub use types::{
    BlankNode, Literal, NamedNode, Object, Predicate, RdfError, RdfResult, Subject, Triple,
    TriplePattern,
};
pub use vocab::Vocabulary;
