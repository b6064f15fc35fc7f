//! Tabular input: the movies and credits CSV files and their join
//!
//! Column typing happens here, once, at the boundary. Rows that fail CSV
//! decoding are skipped with a warning; a missing or unreadable file is
//! fatal for the run.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Tabular input errors
#[derive(Error, Debug)]
pub enum TableError {
    /// CSV file could not be opened or read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type TableResult<T> = Result<T, TableError>;

/// One row of the movies table; nested-list columns stay as raw text here
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRow {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub runtime: Option<f64>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub release_date: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
}

/// One row of the credits table
///
/// The credits title column duplicates the movies one and is not carried.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsRow {
    pub movie_id: i64,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// One movie joined with its credits record
#[derive(Debug, Clone)]
pub struct JoinedRow {
    pub movie: MovieRow,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Load the movies table
pub fn load_movies(path: &Path) -> TableResult<Vec<MovieRow>> {
    read_rows(path, "movies")
}

/// Load the credits table
pub fn load_credits(path: &Path) -> TableResult<Vec<CreditsRow>> {
    read_rows(path, "credits")
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path, table: &str) -> TableResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                warn!(table, error = %e, "skipping undecodable row");
            }
        }
    }
    info!(table, rows = rows.len(), skipped, "loaded table");
    Ok(rows)
}

/// Inner-join movies with credits on `id = movie_id`
///
/// Rows without a partner on either side are simply absent from the
/// result; the drop is visible only as the aggregate joined count.
pub fn join(movies: Vec<MovieRow>, credits: Vec<CreditsRow>) -> Vec<JoinedRow> {
    let movie_count = movies.len();
    let mut by_movie_id: FxHashMap<i64, CreditsRow> = FxHashMap::default();
    for row in credits {
        by_movie_id.insert(row.movie_id, row);
    }

    let joined: Vec<JoinedRow> = movies
        .into_iter()
        .filter_map(|movie| {
            by_movie_id.remove(&movie.id).map(|credits| JoinedRow {
                cast: credits.cast,
                crew: credits.crew,
                movie,
            })
        })
        .collect();

    info!(
        movies = movie_count,
        joined = joined.len(),
        "joined movies with credits"
    );
    joined
}
