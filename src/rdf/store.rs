//! In-memory triple store
//!
//! Insertion-ordered primary storage with subject and predicate indexes.
//! Insertion is idempotent: re-adding an existing triple is a no-op, which
//! is what lets the materializer re-emit shared entity nodes (persons,
//! genres, companies) once per mentioning row without duplicating them.

use super::types::{Literal, Object, Predicate, Subject, Triple, TriplePattern};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// Triple store with monotonic, idempotent accumulation
///
/// There is no removal: materialization only ever adds. Iteration order is
/// insertion order, so serialized output is stable across identical runs.
#[derive(Default, Clone)]
pub struct TripleStore {
    /// All triples, in first-insertion order
    triples: IndexSet<Triple>,

    /// Subject key -> positions in `triples`
    by_subject: FxHashMap<String, Vec<usize>>,

    /// Predicate IRI -> positions in `triples`
    by_predicate: FxHashMap<String, Vec<usize>>,
}

impl TripleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple; returns false if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        let subject_key = triple.subject.to_string();
        let predicate_key = triple.predicate.as_str().to_string();

        let (index, inserted) = self.triples.insert_full(triple);
        if inserted {
            self.by_subject.entry(subject_key).or_default().push(index);
            self.by_predicate
                .entry(predicate_key)
                .or_default()
                .push(index);
        }
        inserted
    }

    /// Check whether a triple is present
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the store holds no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples matching a pattern
    ///
    /// Bound subject or predicate positions narrow the scan through the
    /// corresponding index; a fully wild pattern scans everything.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        let candidates: Box<dyn Iterator<Item = &Triple>> = if let Some(ref s) = pattern.subject {
            self.bucket(&self.by_subject, &s.to_string())
        } else if let Some(ref p) = pattern.predicate {
            self.bucket(&self.by_predicate, p.as_str())
        } else {
            Box::new(self.triples.iter())
        };
        candidates.filter(|t| pattern.matches(t)).collect()
    }

    /// Objects of all `(subject, predicate, ?)` triples
    pub fn objects(&self, subject: &Subject, predicate: &Predicate) -> Vec<&Object> {
        self.bucket(&self.by_subject, &subject.to_string())
            .filter(|t| &t.predicate == predicate)
            .map(|t| &t.object)
            .collect()
    }

    /// Subjects of all `(?, predicate, object)` triples
    pub fn subjects_with(&self, predicate: &Predicate, object: &Object) -> Vec<&Subject> {
        self.bucket(&self.by_predicate, predicate.as_str())
            .filter(|t| &t.object == object)
            .map(|t| &t.subject)
            .collect()
    }

    /// First literal object of `(subject, predicate, ?)`, if any
    pub fn literal(&self, subject: &Subject, predicate: &Predicate) -> Option<&Literal> {
        self.bucket(&self.by_subject, &subject.to_string())
            .filter(|t| &t.predicate == predicate)
            .find_map(|t| t.object.as_literal())
    }

    fn bucket<'a>(
        &'a self,
        index: &'a FxHashMap<String, Vec<usize>>,
        key: &str,
    ) -> Box<dyn Iterator<Item = &'a Triple> + 'a> {
        match index.get(key) {
            Some(positions) => Box::new(
                positions
                    .iter()
                    .filter_map(|&i| self.triples.get_index(i)),
            ),
            None => Box::new(std::iter::empty()),
        }
    }
}
