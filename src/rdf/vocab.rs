//! Film-rating vocabulary
//!
//! Every class and property IRI the materializer emits, built once and
//! validated up front. The namespace extends a base schema document that is
//! loaded at run start.

use super::types::{NamedNode, Predicate, RdfResult};
use oxrdf::vocab::{rdf, rdfs};

/// Base IRI of the film-rating namespace
pub const FR_BASE: &str = "http://example.org/film-rating#";

/// Compact an IRI against the film-rating namespace for display
pub fn compact(iri: &str) -> String {
    match iri.strip_prefix(FR_BASE) {
        Some(local) => format!("fr:{}", local),
        None => iri.to_string(),
    }
}

/// Vocabulary classes
#[derive(Debug, Clone)]
pub struct Classes {
    pub movie: NamedNode,
    pub person: NamedNode,
    pub genre: NamedNode,
    pub keyword: NamedNode,
    pub company: NamedNode,
    pub country: NamedNode,
    pub language: NamedNode,
    pub cast_role: NamedNode,
    pub crew_role: NamedNode,
    pub role_type: NamedNode,
}

/// Vocabulary properties
#[derive(Debug, Clone)]
pub struct Properties {
    // movie scalars
    pub movie_title: Predicate,
    pub original_title: Predicate,
    pub budget: Predicate,
    pub revenue: Predicate,
    pub profit: Predicate,
    pub runtime: Predicate,
    pub popularity: Predicate,
    pub vote_average: Predicate,
    pub vote_count: Predicate,
    pub release_date: Predicate,

    // shared
    pub label: Predicate,

    // descriptive links
    pub has_genre: Predicate,
    pub has_keyword: Predicate,
    pub produced_by: Predicate,
    pub produced_in_country: Predicate,
    pub spoken_language: Predicate,

    // credits
    pub has_cast: Predicate,
    pub played_by: Predicate,
    pub character_name: Predicate,
    pub cast_order: Predicate,
    pub has_crew: Predicate,
    pub credits_person: Predicate,
    pub crew_job: Predicate,
    pub crew_department: Predicate,
    pub role_type: Predicate,
    pub directed_by: Predicate,
}

/// RDF/RDFS terms used when extending the base schema
#[derive(Debug, Clone)]
pub struct SchemaTerms {
    pub rdf_type: Predicate,
    pub rdf_property: NamedNode,
    pub rdfs_class: NamedNode,
    pub rdfs_domain: Predicate,
    pub rdfs_range: Predicate,
}

/// The full vocabulary, validated once per run
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub classes: Classes,
    pub props: Properties,
    pub schema: SchemaTerms,
}

fn fr_node(local: &str) -> RdfResult<NamedNode> {
    NamedNode::new(format!("{}{}", FR_BASE, local))
}

fn fr_prop(local: &str) -> RdfResult<Predicate> {
    Ok(Predicate::from(fr_node(local)?))
}

impl Vocabulary {
    /// Build the vocabulary; fails only on an IRI-invalid constant, which
    /// would be a programming error caught by the unit tests
    pub fn new() -> RdfResult<Self> {
        Ok(Self {
            classes: Classes {
                movie: fr_node("Movie")?,
                person: fr_node("Person")?,
                genre: fr_node("Genre")?,
                keyword: fr_node("Keyword")?,
                company: fr_node("Company")?,
                country: fr_node("Country")?,
                language: fr_node("Language")?,
                cast_role: fr_node("CastRole")?,
                crew_role: fr_node("CrewRole")?,
                role_type: fr_node("RoleType")?,
            },
            props: Properties {
                movie_title: fr_prop("movieTitle")?,
                original_title: fr_prop("originalTitle")?,
                budget: fr_prop("budget")?,
                revenue: fr_prop("revenue")?,
                profit: fr_prop("profit")?,
                runtime: fr_prop("runtime")?,
                popularity: fr_prop("popularity")?,
                vote_average: fr_prop("voteAverage")?,
                vote_count: fr_prop("voteCount")?,
                release_date: fr_prop("releaseDate")?,
                label: fr_prop("label")?,
                has_genre: fr_prop("hasGenre")?,
                has_keyword: fr_prop("hasKeyword")?,
                produced_by: fr_prop("producedBy")?,
                produced_in_country: fr_prop("producedInCountry")?,
                spoken_language: fr_prop("spokenLanguage")?,
                has_cast: fr_prop("hasCast")?,
                played_by: fr_prop("playedBy")?,
                character_name: fr_prop("characterName")?,
                cast_order: fr_prop("castOrder")?,
                has_crew: fr_prop("hasCrew")?,
                credits_person: fr_prop("creditsPerson")?,
                crew_job: fr_prop("crewJob")?,
                crew_department: fr_prop("crewDepartment")?,
                role_type: fr_prop("roleType")?,
                directed_by: fr_prop("directedBy")?,
            },
            schema: SchemaTerms {
                rdf_type: Predicate::from(NamedNode::from(rdf::TYPE.into_owned())),
                rdf_property: NamedNode::from(rdf::PROPERTY.into_owned()),
                rdfs_class: NamedNode::from(rdfs::CLASS.into_owned()),
                rdfs_domain: Predicate::from(NamedNode::from(rdfs::DOMAIN.into_owned())),
                rdfs_range: Predicate::from(NamedNode::from(rdfs::RANGE.into_owned())),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_builds() {
        let vocab = Vocabulary::new().unwrap();
        assert_eq!(
            vocab.classes.movie.as_str(),
            "http://example.org/film-rating#Movie"
        );
        assert_eq!(
            vocab.props.directed_by.as_str(),
            "http://example.org/film-rating#directedBy"
        );
        assert_eq!(
            vocab.schema.rdf_type.as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
    }

    #[test]
    fn test_compact() {
        assert_eq!(
            compact("http://example.org/film-rating#genre/28"),
            "fr:genre/28"
        );
        assert_eq!(compact("http://other.org/x"), "http://other.org/x");
    }
}
