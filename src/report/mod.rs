//! Dataset statistics reporter
//!
//! Reads the same raw CSVs the materializer does and prints descriptive
//! summaries: row counts, missing-value shares, numeric distributions,
//! top genres, and the exploded cast/crew views used to design the role
//! taxonomy. Writes a handful of summary CSV files alongside the console
//! output. This collaborator never touches the graph.

use crate::ingest::record::{parse_records, CastCredit, CrewCredit, EntityRef};
use crate::ingest::tables::{CreditsRow, MovieRow};
use comfy_table::{ContentArrangement, Table};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Reporter errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Descriptive summary of one numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub p99: f64,
    pub max: f64,
}

/// Summarize a numeric sample; None when the sample is empty
pub fn summarize(mut values: Vec<f64>) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let pct = |q: f64| values[(((count - 1) as f64) * q).round() as usize];
    Some(NumericSummary {
        count,
        mean,
        min: values[0],
        p25: pct(0.25),
        median: pct(0.5),
        p75: pct(0.75),
        p90: pct(0.9),
        p99: pct(0.99),
        max: values[count - 1],
    })
}

/// One exploded cast row (one actor in one movie)
#[derive(Debug, Clone, Serialize)]
pub struct CastRecord {
    pub movie_id: i64,
    pub person_id: Option<i64>,
    pub person_name: Option<String>,
    pub character: Option<String>,
    pub order: Option<i64>,
}

/// One exploded crew row (one crew member in one movie)
#[derive(Debug, Clone, Serialize)]
pub struct CrewRecord {
    pub movie_id: i64,
    pub person_id: Option<i64>,
    pub person_name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
}

/// Flatten the credits table into per-appearance rows
pub fn explode_credits(credits: &[CreditsRow]) -> (Vec<CastRecord>, Vec<CrewRecord>) {
    let mut cast = Vec::new();
    let mut crew = Vec::new();
    for row in credits {
        for c in parse_records::<CastCredit>(row.cast.as_deref()) {
            cast.push(CastRecord {
                movie_id: row.movie_id,
                person_id: c.id,
                person_name: c.name,
                character: c.character,
                order: c.order,
            });
        }
        for c in parse_records::<CrewCredit>(row.crew.as_deref()) {
            crew.push(CrewRecord {
                movie_id: row.movie_id,
                person_id: c.id,
                person_name: c.name,
                job: c.job,
                department: c.department,
            });
        }
    }
    (cast, crew)
}

/// Count occurrences, descending, ties broken lexically
pub fn ranked_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_default() += 1;
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

fn print_ranked(title: &str, ranked: &[(String, usize)], limit: usize) {
    println!("\n{}", title);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["value", "count"]);
    for (value, count) in ranked.iter().take(limit) {
        table.add_row(vec![value.clone(), count.to_string()]);
    }
    println!("{table}");
}

fn print_summary(title: &str, summary: Option<NumericSummary>) {
    match summary {
        Some(s) => println!(
            "{:<16} count={} mean={:.2} min={:.2} p25={:.2} p50={:.2} p75={:.2} p90={:.2} p99={:.2} max={:.2}",
            title, s.count, s.mean, s.min, s.p25, s.median, s.p75, s.p90, s.p99, s.max
        ),
        None => println!("{:<16} (no values)", title),
    }
}

/// Console report over the movies table
pub fn report_movies(movies: &[MovieRow]) {
    println!("=== Movies table ===");
    println!("Movies: {}", movies.len());

    let total = movies.len().max(1) as f64;
    let missing = [
        ("budget", movies.iter().filter(|m| m.budget.is_none()).count()),
        ("revenue", movies.iter().filter(|m| m.revenue.is_none()).count()),
        ("genres", movies.iter().filter(|m| m.genres.is_none()).count()),
        ("keywords", movies.iter().filter(|m| m.keywords.is_none()).count()),
        ("runtime", movies.iter().filter(|m| m.runtime.is_none()).count()),
        ("vote_average", movies.iter().filter(|m| m.vote_average.is_none()).count()),
        ("vote_count", movies.iter().filter(|m| m.vote_count.is_none()).count()),
        ("popularity", movies.iter().filter(|m| m.popularity.is_none()).count()),
        (
            "production_companies",
            movies.iter().filter(|m| m.production_companies.is_none()).count(),
        ),
        (
            "production_countries",
            movies.iter().filter(|m| m.production_countries.is_none()).count(),
        ),
        (
            "spoken_languages",
            movies.iter().filter(|m| m.spoken_languages.is_none()).count(),
        ),
    ];
    println!("\nMissing-value share per key column:");
    for (column, count) in missing {
        println!("  {:<22} {:.3}", column, count as f64 / total);
    }

    println!("\nNumeric column summaries:");
    print_summary(
        "budget",
        summarize(movies.iter().filter_map(|m| m.budget.map(|v| v as f64)).collect()),
    );
    print_summary(
        "revenue",
        summarize(movies.iter().filter_map(|m| m.revenue.map(|v| v as f64)).collect()),
    );
    print_summary(
        "runtime",
        summarize(movies.iter().filter_map(|m| m.runtime).collect()),
    );
    print_summary(
        "vote_average",
        summarize(movies.iter().filter_map(|m| m.vote_average).collect()),
    );
    print_summary(
        "vote_count",
        summarize(movies.iter().filter_map(|m| m.vote_count.map(|v| v as f64)).collect()),
    );
    print_summary(
        "popularity",
        summarize(movies.iter().filter_map(|m| m.popularity).collect()),
    );

    let genre_names: Vec<String> = movies
        .iter()
        .flat_map(|m| parse_records::<EntityRef>(m.genres.as_deref()))
        .filter_map(|g| g.name)
        .collect();
    let ranked = ranked_counts(genre_names.iter().map(String::as_str));
    print_ranked("Top-20 genres by movie count:", &ranked, 20);

    let genres_per_movie: Vec<f64> = movies
        .iter()
        .map(|m| parse_records::<EntityRef>(m.genres.as_deref()).len() as f64)
        .collect();
    println!("\nGenres per movie:");
    print_summary("genres/movie", summarize(genres_per_movie));
}

/// Console + CSV report over the credits table
pub fn report_credits(credits: &[CreditsRow], out_dir: &Path) -> ReportResult<()> {
    println!("\n=== Credits table ===");
    println!("Credits rows (movies): {}", credits.len());

    let (cast, crew) = explode_credits(credits);
    println!("Cast rows (actor-in-movie): {}", cast.len());
    println!("Crew rows (crew-member-in-movie): {}", crew.len());

    // Unique persons per movie.
    let mut cast_per_movie: IndexMap<i64, indexmap::IndexSet<i64>> = IndexMap::new();
    for record in &cast {
        if let Some(person) = record.person_id {
            cast_per_movie.entry(record.movie_id).or_default().insert(person);
        }
    }
    let mut crew_per_movie: IndexMap<i64, indexmap::IndexSet<i64>> = IndexMap::new();
    for record in &crew {
        if let Some(person) = record.person_id {
            crew_per_movie.entry(record.movie_id).or_default().insert(person);
        }
    }
    println!("\nUnique cast members per movie:");
    print_summary(
        "cast/movie",
        summarize(cast_per_movie.values().map(|s| s.len() as f64).collect()),
    );
    println!("Unique crew members per movie:");
    print_summary(
        "crew/movie",
        summarize(crew_per_movie.values().map(|s| s.len() as f64).collect()),
    );

    let job_counts = ranked_counts(crew.iter().filter_map(|c| c.job.as_deref()));
    print_ranked("Top-40 crew jobs:", &job_counts, 40);

    let dept_counts = ranked_counts(crew.iter().filter_map(|c| c.department.as_deref()));
    print_ranked("Crew departments:", &dept_counts, dept_counts.len());

    for department in ["Directing", "Writing"] {
        let jobs = ranked_counts(
            crew.iter()
                .filter(|c| c.department.as_deref() == Some(department))
                .filter_map(|c| c.job.as_deref()),
        );
        print_ranked(&format!("Top-20 jobs in {}:", department), &jobs, 20);
    }

    println!("\nCast billing order:");
    print_summary(
        "order",
        summarize(cast.iter().filter_map(|c| c.order.map(|o| o as f64)).collect()),
    );

    write_summary_files(&cast, &crew, &job_counts, out_dir)?;
    Ok(())
}

fn write_summary_files(
    cast: &[CastRecord],
    crew: &[CrewRecord],
    job_counts: &[(String, usize)],
    out_dir: &Path,
) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("crew_jobs_stats.csv"))?;
    writer.write_record(["job", "count"])?;
    for (job, count) in job_counts {
        writer.write_record([job.clone(), count.to_string()])?;
    }
    writer.flush()?;

    // job x department frequency, for role-taxonomy review.
    let mut pair_counts: IndexMap<(String, String), usize> = IndexMap::new();
    for record in crew {
        if let (Some(job), Some(dept)) = (record.job.as_deref(), record.department.as_deref()) {
            *pair_counts.entry((job.to_string(), dept.to_string())).or_default() += 1;
        }
    }
    let mut pairs: Vec<_> = pair_counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut writer = csv::Writer::from_path(out_dir.join("crew_job_department_stats.csv"))?;
    writer.write_record(["job", "department", "count"])?;
    for ((job, dept), count) in &pairs {
        writer.write_record([job.clone(), dept.clone(), count.to_string()])?;
    }
    writer.flush()?;

    let character_counts = ranked_counts(cast.iter().filter_map(|c| c.character.as_deref()));
    let mut writer = csv::Writer::from_path(out_dir.join("cast_character_stats.csv"))?;
    writer.write_record(["character", "count"])?;
    for (character, count) in character_counts.iter().take(30) {
        writer.write_record([character.clone(), count.to_string()])?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(out_dir.join("cast_exploded_sample.csv"))?;
    for record in cast {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(out_dir.join("crew_exploded_sample.csv"))?;
    for record in crew {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(out_dir = %out_dir.display(), "wrote summary files");
    println!("\nSummary files written to {}:", out_dir.display());
    println!("  - crew_jobs_stats.csv");
    println!("  - crew_job_department_stats.csv");
    println!("  - cast_character_stats.csv");
    println!("  - cast_exploded_sample.csv");
    println!("  - crew_exploded_sample.csv");
    Ok(())
}
