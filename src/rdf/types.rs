//! RDF term definitions
//!
//! Thin wrappers around the oxrdf primitives, with typed-literal
//! constructors and accessors for the XSD datatypes the film vocabulary
//! reads and writes.

use oxrdf::vocab::xsd;
use oxrdf::{
    BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode,
    Subject as OxSubject, Term as OxTerm, Triple as OxTriple,
};
use std::fmt;
use thiserror::Error;

/// RDF term errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node identifier
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal (bad language tag)
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a named node from an IRI string, validating the IRI
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        OxNamedNode::new(iri.into())
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(e.to_string()))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNode> for OxNamedNode {
    fn from(node: NamedNode) -> Self {
        node.0
    }
}

/// Blank node
///
/// The materializer never emits blank nodes, but base schema documents may
/// contain them, so the store and the Turtle codec round-trip them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a blank node with a fresh unique identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node from an existing identifier
    pub fn from_identifier(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(e.to_string()))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// RDF literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// xsd:string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_typed_literal(value, xsd::STRING))
    }

    /// xsd:integer literal
    pub fn integer(value: i64) -> Self {
        Self(OxLiteral::new_typed_literal(value.to_string(), xsd::INTEGER))
    }

    /// xsd:decimal literal
    pub fn decimal(value: f64) -> Self {
        Self(OxLiteral::new_typed_literal(value.to_string(), xsd::DECIMAL))
    }

    /// xsd:date literal from a `YYYY-MM-DD` lexical form
    pub fn date(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_typed_literal(value, xsd::DATE))
    }

    /// Literal with an arbitrary datatype; only produced when parsing
    /// external documents
    pub fn typed(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, OxNamedNode::from(datatype)))
    }

    /// Language-tagged literal; only produced when parsing external documents
    pub fn language_tagged(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the datatype IRI string
    pub fn datatype(&self) -> &str {
        self.0.datatype().as_str()
    }

    /// Get the language tag, if any
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Interpret as an integer, if the datatype and lexical form allow
    pub fn as_integer(&self) -> Option<i64> {
        if self.0.datatype() == xsd::INTEGER {
            self.value().parse().ok()
        } else {
            None
        }
    }

    /// Interpret as a decimal; integer literals widen
    pub fn as_decimal(&self) -> Option<f64> {
        if self.0.datatype() == xsd::DECIMAL || self.0.datatype() == xsd::INTEGER {
            self.value().parse().ok()
        } else {
            None
        }
    }

    /// The `YYYY-MM-DD` lexical form, if this is an xsd:date literal
    pub fn as_date(&self) -> Option<&str> {
        if self.0.datatype() == xsd::DATE {
            Some(self.value())
        } else {
            None
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OxLiteral> for Literal {
    fn from(lit: OxLiteral) -> Self {
        Self(lit)
    }
}

impl From<Literal> for OxLiteral {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

/// Triple subject (named node or blank node)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl Subject {
    /// The IRI string, when this subject is a named node
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Subject::NamedNode(n) => Some(n.as_str()),
            Subject::BlankNode(_) => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::NamedNode(n) => write!(f, "{}", n),
            Subject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for Subject {
    fn from(node: NamedNode) -> Self {
        Subject::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::BlankNode(node)
    }
}

impl From<OxSubject> for Subject {
    fn from(subject: OxSubject) -> Self {
        match subject {
            OxSubject::NamedNode(n) => Subject::NamedNode(n.into()),
            OxSubject::BlankNode(b) => Subject::BlankNode(BlankNode(b)),
            #[allow(unreachable_patterns)]
            _ => panic!("RDF-star subjects not supported"),
        }
    }
}

impl From<Subject> for OxSubject {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(n) => OxSubject::NamedNode(n.0),
            Subject::BlankNode(b) => OxSubject::BlankNode(b.0),
        }
    }
}

/// Triple predicate (always a named node)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate(NamedNode);

impl Predicate {
    /// Create a predicate from an IRI
    pub fn new(iri: impl Into<String>) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// The IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying named node
    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for Predicate {
    fn from(node: NamedNode) -> Self {
        Predicate(node)
    }
}

/// Triple object (named node, blank node, or literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl Object {
    /// The IRI string, when this object is a named node
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Object::NamedNode(n) => Some(n.as_str()),
            _ => None,
        }
    }

    /// The literal, when this object is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::NamedNode(n) => write!(f, "{}", n),
            Object::BlankNode(b) => write!(f, "{}", b),
            Object::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for Object {
    fn from(node: NamedNode) -> Self {
        Object::NamedNode(node)
    }
}

impl From<BlankNode> for Object {
    fn from(node: BlankNode) -> Self {
        Object::BlankNode(node)
    }
}

impl From<Literal> for Object {
    fn from(lit: Literal) -> Self {
        Object::Literal(lit)
    }
}

impl From<OxTerm> for Object {
    fn from(term: OxTerm) -> Self {
        match term {
            OxTerm::NamedNode(n) => Object::NamedNode(n.into()),
            OxTerm::BlankNode(b) => Object::BlankNode(BlankNode(b)),
            OxTerm::Literal(l) => Object::Literal(l.into()),
            #[allow(unreachable_patterns)]
            _ => panic!("RDF-star objects not supported"),
        }
    }
}

impl From<Object> for OxTerm {
    fn from(object: Object) -> Self {
        match object {
            Object::NamedNode(n) => OxTerm::NamedNode(n.0),
            Object::BlankNode(b) => OxTerm::BlankNode(b.0),
            Object::Literal(l) => OxTerm::Literal(l.0),
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: Subject,
    /// Predicate
    pub predicate: Predicate,
    /// Object
    pub object: Object,
}

impl Triple {
    /// Create a new triple
    pub fn new(
        subject: impl Into<Subject>,
        predicate: impl Into<Predicate>,
        object: impl Into<Object>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Convert to the oxrdf representation
    pub fn to_oxrdf(&self) -> OxTriple {
        OxTriple::new(
            OxSubject::from(self.subject.clone()),
            OxNamedNode::from(self.predicate.0.clone()),
            OxTerm::from(self.object.clone()),
        )
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Triple pattern for queries; `None` positions match anything
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriplePattern {
    /// Subject (None = wildcard)
    pub subject: Option<Subject>,
    /// Predicate (None = wildcard)
    pub predicate: Option<Predicate>,
    /// Object (None = wildcard)
    pub object: Option<Object>,
}

impl TriplePattern {
    /// Create a new triple pattern
    pub fn new(
        subject: Option<Subject>,
        predicate: Option<Predicate>,
        object: Option<Object>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Check whether a triple matches this pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        if let Some(ref s) = self.subject {
            if s != &triple.subject {
                return false;
            }
        }
        if let Some(ref p) = self.predicate {
            if p != &triple.predicate {
                return false;
            }
        }
        if let Some(ref o) = self.object {
            if o != &triple.object {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/film-rating#movie/42").unwrap();
        assert_eq!(node.as_str(), "http://example.org/film-rating#movie/42");
        assert_eq!(
            node.to_string(),
            "<http://example.org/film-rating#movie/42>"
        );
    }

    #[test]
    fn test_invalid_iri() {
        assert!(NamedNode::new("not an iri").is_err());
    }

    #[test]
    fn test_typed_literals() {
        let lit = Literal::integer(2_000_000);
        assert_eq!(lit.value(), "2000000");
        assert_eq!(lit.as_integer(), Some(2_000_000));
        assert_eq!(lit.as_decimal(), Some(2_000_000.0));

        let lit = Literal::decimal(7.5);
        assert_eq!(lit.as_decimal(), Some(7.5));
        assert_eq!(lit.as_integer(), None);

        let lit = Literal::date("2009-05-01");
        assert_eq!(lit.as_date(), Some("2009-05-01"));
        assert_eq!(lit.as_integer(), None);

        let lit = Literal::string("Action");
        assert_eq!(lit.value(), "Action");
        assert_eq!(lit.as_date(), None);
    }

    #[test]
    fn test_triple_pattern_matching() {
        let movie = NamedNode::new("http://example.org/film-rating#movie/1").unwrap();
        let pred = Predicate::new("http://example.org/film-rating#movieTitle").unwrap();
        let triple = Triple::new(movie.clone(), pred.clone(), Literal::string("Up"));

        let pattern = TriplePattern::new(Some(movie.clone().into()), None, None);
        assert!(pattern.matches(&triple));

        let other = NamedNode::new("http://example.org/film-rating#movie/2").unwrap();
        let pattern = TriplePattern::new(Some(other.into()), None, None);
        assert!(!pattern.matches(&triple));

        let pattern = TriplePattern::default();
        assert!(pattern.matches(&triple));

        let pattern = TriplePattern::new(None, Some(pred), Some(Literal::string("Up").into()));
        assert!(pattern.matches(&triple));
    }

    #[test]
    fn test_blank_nodes_are_unique() {
        assert_ne!(BlankNode::new(), BlankNode::new());
    }
}
