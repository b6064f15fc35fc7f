//! Read-side lens over the materialized graph
//!
//! The battery does not touch the CSV data: everything it aggregates is
//! pulled back out of the triple store through its pattern surface, once,
//! into per-movie fact rows. The lens is strictly read-only.

use crate::rdf::{Literal, Object, Predicate, RdfResult, Subject, TripleStore, Vocabulary};
use crate::rdf::vocab::compact;
use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;

/// One crew credit as seen from the graph
#[derive(Debug, Clone)]
pub struct CrewEntry {
    /// Person IRI
    pub person: String,
    /// Raw job title, when recorded
    pub job: Option<String>,
}

/// Everything the battery needs to know about one movie
#[derive(Debug, Clone, Default)]
pub struct MovieFacts {
    pub iri: String,
    pub revenue: Option<i64>,
    pub profit: Option<i64>,
    pub runtime: Option<f64>,
    pub vote_average: Option<f64>,
    pub release_date: Option<NaiveDate>,
    /// Genre IRIs
    pub genres: Vec<String>,
    /// Keyword IRIs
    pub keywords: Vec<String>,
    /// Company IRIs
    pub companies: Vec<String>,
    /// Language IRIs
    pub languages: Vec<String>,
    /// Person IRIs of cast appearances (one entry per appearance)
    pub cast: Vec<String>,
    /// Crew appearances
    pub crew: Vec<CrewEntry>,
    /// Person IRIs from the derived directedBy edge
    pub directed_by: Vec<String>,
}

impl MovieFacts {
    /// Release year, when the release date is recorded
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }
}

/// Extracted movie facts plus the label table for display
pub struct MovieLens {
    pub movies: Vec<MovieFacts>,
    labels: FxHashMap<String, String>,
}

impl MovieLens {
    /// Build the lens by reading the whole store once
    pub fn from_store(store: &TripleStore) -> RdfResult<Self> {
        let vocab = Vocabulary::new()?;
        let props = &vocab.props;

        let mut labels = FxHashMap::default();
        for triple in store.query(&crate::rdf::TriplePattern::new(
            None,
            Some(props.label.clone()),
            None,
        )) {
            if let (Some(iri), Some(lit)) = (triple.subject.as_iri(), triple.object.as_literal()) {
                labels
                    .entry(iri.to_string())
                    .or_insert_with(|| lit.value().to_string());
            }
        }

        let movie_class = Object::NamedNode(vocab.classes.movie.clone());
        let mut movies = Vec::new();
        for subject in store.subjects_with(&vocab.schema.rdf_type, &movie_class) {
            let Some(iri) = subject.as_iri() else { continue };
            let subject = subject.clone();

            let mut facts = MovieFacts {
                iri: iri.to_string(),
                revenue: integer_of(store, &subject, &props.revenue),
                profit: integer_of(store, &subject, &props.profit),
                runtime: decimal_of(store, &subject, &props.runtime),
                vote_average: decimal_of(store, &subject, &props.vote_average),
                release_date: store
                    .literal(&subject, &props.release_date)
                    .and_then(Literal::as_date)
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
                ..MovieFacts::default()
            };

            facts.genres = iris_of(store, &subject, &props.has_genre);
            facts.keywords = iris_of(store, &subject, &props.has_keyword);
            facts.companies = iris_of(store, &subject, &props.produced_by);
            facts.languages = iris_of(store, &subject, &props.spoken_language);
            facts.directed_by = iris_of(store, &subject, &props.directed_by);

            for appearance in node_subjects_of(store, &subject, &props.has_cast) {
                facts
                    .cast
                    .extend(iris_of(store, &appearance, &props.played_by));
            }

            for appearance in node_subjects_of(store, &subject, &props.has_crew) {
                let job = store
                    .literal(&appearance, &props.crew_job)
                    .map(|l| l.value().to_string());
                for person in iris_of(store, &appearance, &props.credits_person) {
                    facts.crew.push(CrewEntry {
                        person,
                        job: job.clone(),
                    });
                }
            }

            movies.push(facts);
        }

        Ok(Self { movies, labels })
    }

    /// The `fr:label` of an entity, when recorded
    pub fn label(&self, iri: &str) -> Option<&str> {
        self.labels.get(iri).map(String::as_str)
    }

    /// Display form: the label when present, the compacted IRI otherwise
    pub fn label_or_iri(&self, iri: &str) -> String {
        match self.labels.get(iri) {
            Some(label) => label.clone(),
            None => compact(iri),
        }
    }
}

fn integer_of(store: &TripleStore, subject: &Subject, predicate: &Predicate) -> Option<i64> {
    store.literal(subject, predicate).and_then(Literal::as_integer)
}

fn decimal_of(store: &TripleStore, subject: &Subject, predicate: &Predicate) -> Option<f64> {
    store.literal(subject, predicate).and_then(Literal::as_decimal)
}

fn iris_of(store: &TripleStore, subject: &Subject, predicate: &Predicate) -> Vec<String> {
    store
        .objects(subject, predicate)
        .into_iter()
        .filter_map(Object::as_iri)
        .map(str::to_string)
        .collect()
}

fn node_subjects_of(store: &TripleStore, subject: &Subject, predicate: &Predicate) -> Vec<Subject> {
    store
        .objects(subject, predicate)
        .into_iter()
        .filter_map(|o| match o {
            Object::NamedNode(n) => Some(Subject::NamedNode(n.clone())),
            _ => None,
        })
        .collect()
}
