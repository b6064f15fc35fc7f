//! Analytical query battery over the materialized graph
//!
//! A fixed set of read-only queries, each evaluated against the lens with
//! a soft wall-clock measurement around it (no hard timeout) and rendered
//! as a console table with a result count.

pub mod battery;
pub mod lens;

pub use lens::MovieLens;

use crate::rdf::{RdfResult, TripleStore};
use comfy_table::{ContentArrangement, Table};
use std::time::{Duration, Instant};

/// Tabular result of one query
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Column headers
    pub columns: Vec<&'static str>,
    /// Result rows, already formatted for display
    pub rows: Vec<Vec<String>>,
}

/// One executed query with its timing
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Display name of the query
    pub name: &'static str,
    /// Soft wall-clock time of the evaluation
    pub elapsed: Duration,
    /// The tabular result
    pub result: QueryResult,
}

type QueryFn = fn(&MovieLens) -> QueryResult;

const BATTERY: &[(&str, QueryFn)] = &[
    ("Top genres by movie count", battery::top_genres),
    ("Movies released in 2009", battery::movies_released_in_2009),
    (
        "1. Top-grossing directors (Action, 2009)",
        battery::top_directors_action_2009,
    ),
    (
        "1a. Top-grossing directors (any genre, 2009)",
        battery::top_directors_2009,
    ),
    (
        "2. Actors in highly rated Drama (2000-2010)",
        battery::drama_actors_2000_2010,
    ),
    (
        "3. Top-grossing production companies (2005-2010)",
        battery::top_companies_2005_2010,
    ),
    (
        "4. Languages by average rating in Science Fiction",
        battery::sci_fi_languages,
    ),
    (
        "5. Directors beating their genre average",
        battery::directors_above_genre_average,
    ),
    (
        "6. Crew on above-average-profit movies",
        battery::crew_on_high_profit_movies,
    ),
    (
        "7. Genres by average runtime (2010)",
        battery::genres_by_runtime_2010,
    ),
    (
        "8. Keywords of top-rated movies (2000-2010)",
        battery::keywords_of_top_rated,
    ),
];

/// Run the whole battery against a graph
pub fn run_battery(store: &TripleStore) -> RdfResult<Vec<QueryOutcome>> {
    let lens = MovieLens::from_store(store)?;
    let mut outcomes = Vec::with_capacity(BATTERY.len());
    for &(name, query) in BATTERY {
        let start = Instant::now();
        let result = query(&lens);
        outcomes.push(QueryOutcome {
            name,
            elapsed: start.elapsed(),
            result,
        });
    }
    Ok(outcomes)
}

/// Print one outcome the way the console report expects it
pub fn print_outcome(outcome: &QueryOutcome) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Query: {}", outcome.name);
    println!("{}", "=".repeat(60));
    println!("Elapsed: {:.3}s", outcome.elapsed.as_secs_f64());

    if outcome.result.rows.is_empty() {
        println!("No results");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(outcome.result.columns.clone());
    for row in &outcome.result.rows {
        table.add_row(row.clone());
    }
    println!("{table}");
    println!("Rows: {}", outcome.result.rows.len());
}
