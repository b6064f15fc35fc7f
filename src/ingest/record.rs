//! Nested-list record parsing
//!
//! The movies and credits tables embed structured lists as text cells, in
//! two dialects: plain JSON, and Python-literal syntax with single-quoted
//! strings (the form the credits dump uses). `parse_records` is total over
//! arbitrary cell content: anything empty, malformed, or otherwise
//! undecodable yields an empty list, and elements that fail typed decoding
//! are dropped one by one rather than poisoning the rest of the cell.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Genre / keyword / company reference: `{id, name}`
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Production country reference: `{iso_3166_1, name}`
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRef {
    #[serde(rename = "iso_3166_1")]
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Spoken language reference: `{iso_639_1, name}`
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRef {
    #[serde(rename = "iso_639_1")]
    pub code: Option<String>,
    pub name: Option<String>,
}

/// One cast credit
#[derive(Debug, Clone, Deserialize)]
pub struct CastCredit {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub order: Option<i64>,
}

/// One crew credit
#[derive(Debug, Clone, Deserialize)]
pub struct CrewCredit {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
}

/// Decode a nested-list cell into typed records; never fails
pub fn parse_records<T: DeserializeOwned>(cell: Option<&str>) -> Vec<T> {
    let raw = match cell {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Vec::new(),
    };
    decode_list(raw)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

fn decode_list(raw: &str) -> Option<Vec<Value>> {
    if let Ok(Value::Array(items)) = serde_json::from_str(raw) {
        return Some(items);
    }
    match serde_json::from_str(&python_literal_to_json(raw)) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Rewrite Python-literal syntax into JSON
///
/// Handles single-quoted strings (converting embedded double quotes and
/// `\'` escapes), and the bare words `None`/`True`/`False` outside strings.
/// Anything it cannot make sense of simply fails the subsequent JSON parse.
fn python_literal_to_json(input: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Outside,
        Single,
        Double,
    }

    let mut out = String::with_capacity(input.len());
    let mut state = State::Outside;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Outside => match c {
                '\'' => {
                    state = State::Single;
                    out.push('"');
                }
                '"' => {
                    state = State::Double;
                    out.push('"');
                }
                'A'..='Z' | 'a'..='z' | '_' => {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            word.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    match word.as_str() {
                        "None" => out.push_str("null"),
                        "True" => out.push_str("true"),
                        "False" => out.push_str("false"),
                        other => out.push_str(other),
                    }
                }
                _ => out.push(c),
            },
            State::Single => match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some('"') => out.push_str("\\\""),
                    Some('\\') => out.push_str("\\\\"),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                '\'' => {
                    state = State::Outside;
                    out.push('"');
                }
                '"' => out.push_str("\\\""),
                _ => out.push(c),
            },
            State::Double => match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                '"' => {
                    state = State::Outside;
                    out.push('"');
                }
                _ => out.push(c),
            },
        }
    }
    out
}
