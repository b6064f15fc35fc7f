//! Turtle parsing and serialization
//!
//! The base schema document comes in as Turtle and the materialized graph
//! goes out as Turtle, both through rio.

use super::store::TripleStore;
use super::types::{BlankNode, Literal, NamedNode, Object, Predicate, Subject, Triple};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::fs;
use std::io::{BufReader, Cursor};
use std::path::Path;
use thiserror::Error;

/// Turtle I/O errors
#[derive(Error, Debug)]
pub enum TurtleError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Turtle parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Turtle serialization error: {0}")]
    Serialize(String),
}

pub type TurtleResult<T> = Result<T, TurtleError>;

/// Parse a Turtle document into triples
pub fn parse(input: &str) -> TurtleResult<Vec<Triple>> {
    let cursor = Cursor::new(input);
    let mut reader = BufReader::new(cursor);
    let mut parser = TurtleParser::new(&mut reader, None);

    let mut triples = Vec::new();

    let res: Result<(), rio_turtle::TurtleError> = parser.parse_all(&mut |t| {
        let subject = convert_subject(t.subject)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let predicate = convert_predicate(t.predicate)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let object = convert_object(t.object)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        triples.push(Triple::new(subject, predicate, object));
        Ok(())
    });

    match res {
        Ok(_) => Ok(triples),
        Err(e) => Err(TurtleError::Parse(e.to_string())),
    }
}

/// Serialize triples to a Turtle string
pub fn serialize<'a>(triples: impl Iterator<Item = &'a Triple>) -> TurtleResult<String> {
    let mut output = Vec::new();
    let mut formatter = TurtleFormatter::new(&mut output);

    for triple in triples {
        let s_node;
        let s_blank;
        let subject = match &triple.subject {
            Subject::NamedNode(n) => {
                s_node = rio_api::model::NamedNode { iri: n.as_str() };
                rio_api::model::Subject::NamedNode(s_node)
            }
            Subject::BlankNode(b) => {
                s_blank = rio_api::model::BlankNode { id: b.as_str() };
                rio_api::model::Subject::BlankNode(s_blank)
            }
        };

        let p_node = rio_api::model::NamedNode {
            iri: triple.predicate.as_str(),
        };

        let o_node;
        let o_blank;
        let o_datatype;
        let object = match &triple.object {
            Object::NamedNode(n) => {
                o_node = rio_api::model::NamedNode { iri: n.as_str() };
                rio_api::model::Term::NamedNode(o_node)
            }
            Object::BlankNode(b) => {
                o_blank = rio_api::model::BlankNode { id: b.as_str() };
                rio_api::model::Term::BlankNode(o_blank)
            }
            Object::Literal(l) => {
                if let Some(lang) = l.language() {
                    rio_api::model::Term::Literal(rio_api::model::Literal::LanguageTaggedString {
                        value: l.value(),
                        language: lang,
                    })
                } else if l.datatype() == "http://www.w3.org/2001/XMLSchema#string" {
                    rio_api::model::Term::Literal(rio_api::model::Literal::Simple {
                        value: l.value(),
                    })
                } else {
                    o_datatype = rio_api::model::NamedNode { iri: l.datatype() };
                    rio_api::model::Term::Literal(rio_api::model::Literal::Typed {
                        value: l.value(),
                        datatype: o_datatype,
                    })
                }
            }
        };

        formatter
            .format(&rio_api::model::Triple {
                subject,
                predicate: p_node,
                object,
            })
            .map_err(|e| TurtleError::Serialize(e.to_string()))?;
    }

    formatter
        .finish()
        .map_err(|e| TurtleError::Serialize(e.to_string()))?;

    String::from_utf8(output).map_err(|e| TurtleError::Serialize(e.to_string()))
}

/// Load a Turtle file into the store; returns the number of triples added
pub fn load_file(path: &Path, store: &mut TripleStore) -> TurtleResult<usize> {
    let input = fs::read_to_string(path)?;
    let mut added = 0;
    for triple in parse(&input)? {
        if store.insert(triple) {
            added += 1;
        }
    }
    Ok(added)
}

/// Write the whole store to a Turtle file in one terminal step
pub fn save_file(path: &Path, store: &TripleStore) -> TurtleResult<()> {
    let output = serialize(store.iter())?;
    fs::write(path, output)?;
    Ok(())
}

fn convert_subject(s: rio_api::model::Subject) -> Result<Subject, String> {
    match s {
        rio_api::model::Subject::NamedNode(n) => NamedNode::new(n.iri)
            .map(Subject::NamedNode)
            .map_err(|e| e.to_string()),
        rio_api::model::Subject::BlankNode(b) => BlankNode::from_identifier(b.id)
            .map(Subject::BlankNode)
            .map_err(|e| e.to_string()),
        _ => Err("RDF-star subjects not supported".to_string()),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> Result<Predicate, String> {
    Predicate::new(p.iri).map_err(|e| e.to_string())
}

fn convert_object(o: rio_api::model::Term) -> Result<Object, String> {
    match o {
        rio_api::model::Term::NamedNode(n) => NamedNode::new(n.iri)
            .map(Object::NamedNode)
            .map_err(|e| e.to_string()),
        rio_api::model::Term::BlankNode(b) => BlankNode::from_identifier(b.id)
            .map(Object::BlankNode)
            .map_err(|e| e.to_string()),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(Object::Literal(Literal::string(value)))
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => {
                Literal::language_tagged(value, language)
                    .map(Object::Literal)
                    .map_err(|e| e.to_string())
            }
            rio_api::model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| e.to_string())?;
                Ok(Object::Literal(Literal::typed(value, dt)))
            }
        },
        _ => Err("RDF-star objects not supported".to_string()),
    }
}
