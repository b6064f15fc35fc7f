//! Cinegraph CLI: build the film graph, report on the raw tables, or run
//! the analytical query battery over a serialized graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cinegraph::ingest::{join, load_credits, load_movies, GraphMaterializer};
use cinegraph::queries;
use cinegraph::rdf::{turtle, TripleStore};
use cinegraph::report;
use std::path::PathBuf;
use tracing::info;

const MOVIES_CSV: &str = "tmdb_5000_movies.csv";
const CREDITS_CSV: &str = "tmdb_5000_credits.csv";
const SCHEMA_TTL: &str = "film_schema.ttl";
const OUTPUT_TTL: &str = "film_data.ttl";

#[derive(Parser)]
#[command(name = "cinegraph", version, about = "Film knowledge-graph materializer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize the film graph from the CSV tables and write Turtle
    Build {
        /// Movies CSV file
        #[arg(long, default_value = MOVIES_CSV)]
        movies: PathBuf,

        /// Credits CSV file
        #[arg(long, default_value = CREDITS_CSV)]
        credits: PathBuf,

        /// Base schema Turtle file, extended in place
        #[arg(long, default_value = SCHEMA_TTL)]
        schema: PathBuf,

        /// Output Turtle file
        #[arg(long, default_value = OUTPUT_TTL)]
        output: PathBuf,
    },
    /// Print dataset statistics and write summary CSV files
    Report {
        /// Movies CSV file
        #[arg(long, default_value = MOVIES_CSV)]
        movies: PathBuf,

        /// Credits CSV file
        #[arg(long, default_value = CREDITS_CSV)]
        credits: PathBuf,

        /// Directory for the summary CSV files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Load a Turtle graph and run the analytical query battery
    Query {
        /// Materialized graph Turtle file
        #[arg(long, default_value = OUTPUT_TTL)]
        graph: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            movies,
            credits,
            schema,
            output,
        } => run_build(&movies, &credits, &schema, &output),
        Commands::Report {
            movies,
            credits,
            out_dir,
        } => run_report(&movies, &credits, &out_dir),
        Commands::Query { graph } => run_query(&graph),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_build(movies: &PathBuf, credits: &PathBuf, schema: &PathBuf, output: &PathBuf) -> Result<()> {
    let mut store = TripleStore::new();
    let schema_triples = turtle::load_file(schema, &mut store)
        .with_context(|| format!("loading base schema {}", schema.display()))?;
    info!(triples = schema_triples, "loaded base schema");

    let movie_rows =
        load_movies(movies).with_context(|| format!("reading movies table {}", movies.display()))?;
    let credit_rows = load_credits(credits)
        .with_context(|| format!("reading credits table {}", credits.display()))?;
    let joined = join(movie_rows, credit_rows);

    let mut materializer = GraphMaterializer::new(&mut store)?;
    materializer.declare_role_types()?;
    let stats = materializer.materialize(&joined)?;

    turtle::save_file(output, &store)
        .with_context(|| format!("writing graph to {}", output.display()))?;

    println!(
        "Materialized {} rows into {} triples ({} new); wrote {}",
        stats.rows,
        store.len(),
        stats.triples_added,
        output.display()
    );
    Ok(())
}

fn run_report(movies: &PathBuf, credits: &PathBuf, out_dir: &PathBuf) -> Result<()> {
    let movie_rows =
        load_movies(movies).with_context(|| format!("reading movies table {}", movies.display()))?;
    let credit_rows = load_credits(credits)
        .with_context(|| format!("reading credits table {}", credits.display()))?;

    report::report_movies(&movie_rows);
    report::report_credits(&credit_rows, out_dir)
        .with_context(|| format!("writing summary files to {}", out_dir.display()))?;
    Ok(())
}

fn run_query(graph: &PathBuf) -> Result<()> {
    println!("Loading graph {} ...", graph.display());
    let mut store = TripleStore::new();
    let loaded = turtle::load_file(graph, &mut store)
        .with_context(|| format!("loading graph {}", graph.display()))?;
    println!("Loaded {} triples", loaded);

    let outcomes = queries::run_battery(&store)?;
    for outcome in &outcomes {
        queries::print_outcome(outcome);
    }
    println!("\n{}", "=".repeat(60));
    println!("Battery complete: {} queries", outcomes.len());
    Ok(())
}
