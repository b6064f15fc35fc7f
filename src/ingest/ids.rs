//! Identifier scheme
//!
//! Deterministic IRI construction for every entity kind, namespaced per
//! kind under the film-rating base. Equal natural keys always yield
//! byte-identical IRIs, within and across runs. Every constructor
//! validates through [`NamedNode::new`]; the numeric-keyed forms cannot
//! fail in practice, but free-text job titles can (and the materializer
//! skips those single credits).

use crate::rdf::vocab::FR_BASE;
use crate::rdf::{NamedNode, RdfResult};

/// `fr:movie/<id>`
pub fn movie_iri(movie_id: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}movie/{}", FR_BASE, movie_id))
}

/// `fr:person/<id>`
pub fn person_iri(person_id: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}person/{}", FR_BASE, person_id))
}

/// `fr:genre/<id>`
pub fn genre_iri(genre_id: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}genre/{}", FR_BASE, genre_id))
}

/// `fr:keyword/<id>`
pub fn keyword_iri(keyword_id: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}keyword/{}", FR_BASE, keyword_id))
}

/// `fr:company/<id>`
pub fn company_iri(company_id: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}company/{}", FR_BASE, company_id))
}

/// `fr:country/<iso-3166-1 code>`
pub fn country_iri(code: &str) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}country/{}", FR_BASE, code))
}

/// `fr:lang/<iso-639-1 code>`
pub fn language_iri(code: &str) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}lang/{}", FR_BASE, code))
}

/// `fr:cast/<movie>_<person>_<order>`
///
/// The billing order is part of the key: one person can hold several
/// listed roles on the same movie, distinguished only by order.
pub fn cast_iri(movie_id: i64, person_id: i64, order: i64) -> RdfResult<NamedNode> {
    NamedNode::new(format!(
        "{}cast/{}_{}_{}",
        FR_BASE, movie_id, person_id, order
    ))
}

/// `fr:crew/<movie>_<person>_<normalized job>`
///
/// The job title is part of the key: the same person may be credited for
/// several distinct jobs on one movie (Director and Writer, say).
pub fn crew_iri(movie_id: i64, person_id: i64, job: &str) -> RdfResult<NamedNode> {
    NamedNode::new(format!(
        "{}crew/{}_{}_{}",
        FR_BASE,
        movie_id,
        person_id,
        normalize_job(job)
    ))
}

/// `fr:role/<CanonicalRole>`
pub fn role_iri(role_name: &str) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}role/{}", FR_BASE, role_name))
}

/// Normalize a job title for use in a crew IRI: lower-case, then replace
/// each space and forward slash with an underscore. No other characters
/// are altered.
pub fn normalize_job(job: &str) -> String {
    job.to_lowercase().replace([' ', '/'], "_")
}
