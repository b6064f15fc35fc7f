//! The canned analytical queries
//!
//! Each query is a deterministic aggregation over the lens, mirroring the
//! structured pattern it evaluates: required patterns drop movies missing
//! the bound value, repeated bindings (a movie matching several genres,
//! a person holding several qualifying credits) contribute one solution
//! each, and counts of movies are counts of distinct movies. Ties are
//! broken lexically so results are stable run to run.

use super::lens::MovieLens;
use super::QueryResult;
use crate::rdf::vocab::compact;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn fmt_avg(sum: f64, count: usize) -> String {
    format!("{:.2}", sum / count as f64)
}

/// Structure check: genres by distinct movie count
pub fn top_genres(lens: &MovieLens) -> QueryResult {
    let mut groups: IndexMap<String, FxHashSet<&str>> = IndexMap::new();
    for movie in &lens.movies {
        for genre in &movie.genres {
            let Some(label) = lens.label(genre) else { continue };
            groups
                .entry(label.to_string())
                .or_default()
                .insert(movie.iri.as_str());
        }
    }

    let mut rows: Vec<(String, usize)> = groups
        .into_iter()
        .map(|(label, movies)| (label, movies.len()))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(10);

    QueryResult {
        columns: vec!["genreLabel", "movieCount"],
        rows: rows
            .into_iter()
            .map(|(label, count)| vec![label, count.to_string()])
            .collect(),
    }
}

/// Structure check: how many movies were released in 2009
pub fn movies_released_in_2009(lens: &MovieLens) -> QueryResult {
    let count = lens
        .movies
        .iter()
        .filter(|m| m.release_year() == Some(2009))
        .count();
    QueryResult {
        columns: vec!["movieCount"],
        rows: vec![vec![count.to_string()]],
    }
}

fn top_directors(lens: &MovieLens, genre_filter: Option<&str>) -> QueryResult {
    // Key: (director IRI, director name, genre label or empty)
    let mut groups: IndexMap<(String, String, String), (i64, FxHashSet<&str>)> = IndexMap::new();

    for movie in &lens.movies {
        let Some(revenue) = movie.revenue else { continue };
        if movie.release_year() != Some(2009) {
            continue;
        }

        let genre_labels: Vec<String> = match genre_filter {
            Some(needle) => {
                let matched: Vec<String> = movie
                    .genres
                    .iter()
                    .filter_map(|g| lens.label(g))
                    .filter(|l| l.to_lowercase().contains(needle))
                    .map(str::to_string)
                    .collect();
                if matched.is_empty() {
                    continue;
                }
                matched
            }
            None => vec![String::new()],
        };

        for entry in &movie.crew {
            let Some(job) = entry.job.as_deref() else { continue };
            if !job.to_lowercase().contains("director") {
                continue;
            }
            let Some(name) = lens.label(&entry.person) else { continue };

            for genre_label in &genre_labels {
                let key = (entry.person.clone(), name.to_string(), genre_label.clone());
                let acc = groups.entry(key).or_default();
                acc.0 += revenue;
                acc.1.insert(movie.iri.as_str());
            }
        }
    }

    let mut rows: Vec<_> = groups.into_iter().collect();
    rows.sort_by(|a, b| (b.1).0.cmp(&(a.1).0).then_with(|| (a.0).1.cmp(&(b.0).1)));
    rows.truncate(10);

    let with_genre = genre_filter.is_some();
    QueryResult {
        columns: if with_genre {
            vec!["director", "directorName", "genreLabel", "totalRevenue", "movieCount"]
        } else {
            vec!["director", "directorName", "totalRevenue", "movieCount"]
        },
        rows: rows
            .into_iter()
            .map(|((iri, name, genre), (total, movies))| {
                let mut row = vec![compact(&iri), name];
                if with_genre {
                    row.push(genre);
                }
                row.push(total.to_string());
                row.push(movies.len().to_string());
                row
            })
            .collect(),
    }
}

/// 1. Top-grossing crew directors in Action, 2009
pub fn top_directors_action_2009(lens: &MovieLens) -> QueryResult {
    top_directors(lens, Some("action"))
}

/// 1a. Top-grossing crew directors in any genre, 2009
pub fn top_directors_2009(lens: &MovieLens) -> QueryResult {
    top_directors(lens, None)
}

/// 2. Actors in Drama movies rated at least 7.0, 2000-2010
pub fn drama_actors_2000_2010(lens: &MovieLens) -> QueryResult {
    // Key: (actor IRI, actor name, genre label); value: rating sum/count
    // over solutions plus distinct movies.
    type Acc = (f64, usize, FxHashSet<String>);
    let mut groups: IndexMap<(String, String, String), Acc> = IndexMap::new();

    for movie in &lens.movies {
        let Some(rating) = movie.vote_average else { continue };
        let Some(year) = movie.release_year() else { continue };
        if !(2000..=2010).contains(&year) || rating < 7.0 {
            continue;
        }
        let drama_labels: Vec<String> = movie
            .genres
            .iter()
            .filter_map(|g| lens.label(g))
            .filter(|l| l.to_lowercase().contains("drama"))
            .map(str::to_string)
            .collect();
        if drama_labels.is_empty() {
            continue;
        }

        for actor in &movie.cast {
            let Some(name) = lens.label(actor) else { continue };
            for genre_label in &drama_labels {
                let key = (actor.clone(), name.to_string(), genre_label.clone());
                let acc = groups
                    .entry(key)
                    .or_insert_with(|| (0.0, 0, FxHashSet::default()));
                acc.0 += rating;
                acc.1 += 1;
                acc.2.insert(movie.iri.clone());
            }
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter(|(_, (_, _, movies))| movies.len() >= 2)
        .collect();
    rows.sort_by(|a, b| {
        (b.1).2.len().cmp(&(a.1).2.len())
            .then_with(|| ((b.1).0 / (b.1).1 as f64).total_cmp(&((a.1).0 / (a.1).1 as f64)))
            .then_with(|| (a.0).1.cmp(&(b.0).1))
    });
    rows.truncate(10);

    QueryResult {
        columns: vec!["actor", "actorName", "genreLabel", "highRatedMovieCount", "avgRating"],
        rows: rows
            .into_iter()
            .map(|((iri, name, genre), (sum, count, movies))| {
                vec![
                    compact(&iri),
                    name,
                    genre,
                    movies.len().to_string(),
                    fmt_avg(sum, count),
                ]
            })
            .collect(),
    }
}

/// 3. Production companies by total revenue, releases 2005-2010
pub fn top_companies_2005_2010(lens: &MovieLens) -> QueryResult {
    let from = ymd(2005, 1, 1);
    let to = ymd(2010, 12, 31);
    let mut groups: IndexMap<(String, String), (i64, FxHashSet<&str>)> = IndexMap::new();

    for movie in &lens.movies {
        let Some(revenue) = movie.revenue else { continue };
        let Some(date) = movie.release_date else { continue };
        if date < from || date > to {
            continue;
        }
        for company in &movie.companies {
            let Some(name) = lens.label(company) else { continue };
            let acc = groups
                .entry((company.clone(), name.to_string()))
                .or_default();
            acc.0 += revenue;
            acc.1.insert(movie.iri.as_str());
        }
    }

    let mut rows: Vec<_> = groups.into_iter().collect();
    rows.sort_by(|a, b| (b.1).0.cmp(&(a.1).0).then_with(|| (a.0).1.cmp(&(b.0).1)));
    rows.truncate(10);

    QueryResult {
        columns: vec!["company", "companyName", "totalRevenue", "movieCount"],
        rows: rows
            .into_iter()
            .map(|((iri, name), (total, movies))| {
                vec![compact(&iri), name, total.to_string(), movies.len().to_string()]
            })
            .collect(),
    }
}

/// 4. Spoken languages by average rating in Science Fiction
pub fn sci_fi_languages(lens: &MovieLens) -> QueryResult {
    type Acc = (f64, usize, FxHashSet<String>);
    let mut groups: IndexMap<(String, String), Acc> = IndexMap::new();

    for movie in &lens.movies {
        let Some(rating) = movie.vote_average else { continue };
        let sci_fi = movie
            .genres
            .iter()
            .filter_map(|g| lens.label(g))
            .filter(|l| l.to_lowercase().contains("science fiction"))
            .count();
        if sci_fi == 0 {
            continue;
        }

        for language in &movie.languages {
            // The language label is optional in the data; fall back to the
            // compacted IRI for display, as the source battery does.
            let display = lens.label_or_iri(language);
            let acc = groups
                .entry((language.clone(), display))
                .or_insert_with(|| (0.0, 0, FxHashSet::default()));
            // One solution per matching genre binding.
            acc.0 += rating * sci_fi as f64;
            acc.1 += sci_fi;
            acc.2.insert(movie.iri.clone());
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter(|(_, (_, _, movies))| movies.len() >= 3)
        .collect();
    rows.sort_by(|a, b| {
        ((b.1).0 / (b.1).1 as f64)
            .total_cmp(&((a.1).0 / (a.1).1 as f64))
            .then_with(|| (a.0).1.cmp(&(b.0).1))
    });
    rows.truncate(10);

    QueryResult {
        columns: vec!["lang", "langLabel", "avgRating", "movieCount"],
        rows: rows
            .into_iter()
            .map(|((iri, display), (sum, count, movies))| {
                vec![
                    compact(&iri),
                    display,
                    fmt_avg(sum, count),
                    movies.len().to_string(),
                ]
            })
            .collect(),
    }
}

/// 5. Directors whose per-genre average rating beats the genre average
///
/// Genres qualify with at least 10 distinct rated movies; directors (via
/// the derived directedBy edge) qualify with at least 2 movies in the
/// genre.
pub fn directors_above_genre_average(lens: &MovieLens) -> QueryResult {
    // Subquery: average rating per genre over movies with rating > 0.
    let mut genre_acc: IndexMap<String, (f64, usize, FxHashSet<&str>)> = IndexMap::new();
    for movie in &lens.movies {
        let Some(rating) = movie.vote_average.filter(|r| *r > 0.0) else {
            continue;
        };
        for genre in &movie.genres {
            let acc = genre_acc
                .entry(genre.clone())
                .or_insert_with(|| (0.0, 0, FxHashSet::default()));
            acc.0 += rating;
            acc.1 += 1;
            acc.2.insert(movie.iri.as_str());
        }
    }
    let genre_avg: IndexMap<String, f64> = genre_acc
        .into_iter()
        .filter(|(_, (_, _, movies))| movies.len() >= 10)
        .map(|(genre, (sum, count, _))| (genre, sum / count as f64))
        .collect();

    // Main pattern: movies x genres x directors.
    type Acc = (f64, usize, FxHashSet<String>);
    let mut groups: IndexMap<(String, String, String, String), Acc> = IndexMap::new();
    for movie in &lens.movies {
        let Some(rating) = movie.vote_average.filter(|r| *r > 0.0) else {
            continue;
        };
        for genre in &movie.genres {
            if !genre_avg.contains_key(genre) {
                continue;
            }
            let Some(genre_name) = lens.label(genre) else { continue };
            for director in &movie.directed_by {
                let Some(director_name) = lens.label(director) else { continue };
                let key = (
                    director.clone(),
                    director_name.to_string(),
                    genre.clone(),
                    genre_name.to_string(),
                );
                let acc = groups
                    .entry(key)
                    .or_insert_with(|| (0.0, 0, FxHashSet::default()));
                acc.0 += rating;
                acc.1 += 1;
                acc.2.insert(movie.iri.clone());
            }
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter_map(|((director, director_name, genre, genre_name), (sum, count, movies))| {
            let avg = sum / count as f64;
            let baseline = genre_avg.get(&genre).copied()?;
            if movies.len() >= 2 && avg > baseline {
                Some((director, director_name, genre_name, avg, baseline, movies.len()))
            } else {
                None
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        (b.3 - b.4)
            .total_cmp(&(a.3 - a.4))
            .then_with(|| a.1.cmp(&b.1))
    });
    rows.truncate(50);

    QueryResult {
        columns: vec![
            "director",
            "directorName",
            "genreName",
            "directorAvgRating",
            "genreAvgRating",
            "directorMovieCount",
        ],
        rows: rows
            .into_iter()
            .map(|(director, name, genre, avg, baseline, count)| {
                vec![
                    compact(&director),
                    name,
                    genre,
                    format!("{:.2}", avg),
                    format!("{:.2}", baseline),
                    count.to_string(),
                ]
            })
            .collect(),
    }
}

/// 6. Crew members on movies whose materialized profit beats the average
pub fn crew_on_high_profit_movies(lens: &MovieLens) -> QueryResult {
    let profits: Vec<i64> = lens
        .movies
        .iter()
        .filter_map(|m| m.profit.filter(|p| *p > 0))
        .collect();
    if profits.is_empty() {
        return QueryResult {
            columns: vec!["person", "personName", "highProfitMovieCount"],
            rows: Vec::new(),
        };
    }
    let avg_profit = profits.iter().sum::<i64>() as f64 / profits.len() as f64;

    let mut groups: IndexMap<(String, String), FxHashSet<&str>> = IndexMap::new();
    for movie in &lens.movies {
        let Some(profit) = movie.profit else { continue };
        if (profit as f64) <= avg_profit {
            continue;
        }
        for entry in &movie.crew {
            let Some(name) = lens.label(&entry.person) else { continue };
            groups
                .entry((entry.person.clone(), name.to_string()))
                .or_default()
                .insert(movie.iri.as_str());
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter(|(_, movies)| movies.len() >= 2)
        .collect();
    rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| (a.0).1.cmp(&(b.0).1)));
    rows.truncate(10);

    QueryResult {
        columns: vec!["person", "personName", "highProfitMovieCount"],
        rows: rows
            .into_iter()
            .map(|((iri, name), movies)| vec![compact(&iri), name, movies.len().to_string()])
            .collect(),
    }
}

/// 7. Genres by average runtime among successful 2010 releases
pub fn genres_by_runtime_2010(lens: &MovieLens) -> QueryResult {
    type Acc = (f64, usize, FxHashSet<String>, i64);
    let mut groups: IndexMap<(String, String), Acc> = IndexMap::new();

    for movie in &lens.movies {
        let Some(runtime) = movie.runtime.filter(|r| *r > 0.0) else {
            continue;
        };
        let Some(revenue) = movie.revenue.filter(|r| *r >= 50_000_000) else {
            continue;
        };
        if movie.release_year() != Some(2010) {
            continue;
        }
        for genre in &movie.genres {
            let Some(name) = lens.label(genre) else { continue };
            let acc = groups
                .entry((genre.clone(), name.to_string()))
                .or_insert_with(|| (0.0, 0, FxHashSet::default(), 0));
            acc.0 += runtime;
            acc.1 += 1;
            acc.2.insert(movie.iri.clone());
            acc.3 += revenue;
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter(|(_, (_, _, movies, _))| movies.len() >= 2)
        .collect();
    rows.sort_by(|a, b| {
        ((b.1).0 / (b.1).1 as f64)
            .total_cmp(&((a.1).0 / (a.1).1 as f64))
            .then_with(|| (a.0).1.cmp(&(b.0).1))
    });
    rows.truncate(15);

    QueryResult {
        columns: vec!["genre", "genreName", "avgRuntime", "movieCount", "totalRevenue"],
        rows: rows
            .into_iter()
            .map(|((iri, name), (sum, count, movies, revenue))| {
                vec![
                    compact(&iri),
                    name,
                    fmt_avg(sum, count),
                    movies.len().to_string(),
                    revenue.to_string(),
                ]
            })
            .collect(),
    }
}

/// 8. Keywords on highly rated movies, 2000-2010
pub fn keywords_of_top_rated(lens: &MovieLens) -> QueryResult {
    let from = ymd(2000, 1, 1);
    let to = ymd(2010, 12, 31);

    type Acc = (f64, usize, FxHashSet<String>);
    let mut groups: IndexMap<(String, String), Acc> = IndexMap::new();

    for movie in &lens.movies {
        let Some(rating) = movie.vote_average.filter(|r| *r >= 7.0) else {
            continue;
        };
        let Some(date) = movie.release_date else { continue };
        if date < from || date > to {
            continue;
        }
        for keyword in &movie.keywords {
            // Only keywords that carry a label, as in the source battery.
            let Some(label) = lens.label(keyword) else { continue };
            let acc = groups
                .entry((keyword.clone(), label.to_string()))
                .or_insert_with(|| (0.0, 0, FxHashSet::default()));
            acc.0 += rating;
            acc.1 += 1;
            acc.2.insert(movie.iri.clone());
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .filter(|(_, (_, _, movies))| movies.len() >= 3)
        .collect();
    rows.sort_by(|a, b| {
        (b.1).2.len().cmp(&(a.1).2.len())
            .then_with(|| ((b.1).0 / (b.1).1 as f64).total_cmp(&((a.1).0 / (a.1).1 as f64)))
            .then_with(|| (a.0).1.cmp(&(b.0).1))
    });
    rows.truncate(10);

    QueryResult {
        columns: vec!["keyword", "keywordLabel", "movieCount", "avgRating"],
        rows: rows
            .into_iter()
            .map(|((iri, label), (sum, count, movies))| {
                vec![
                    compact(&iri),
                    label,
                    movies.len().to_string(),
                    fmt_avg(sum, count),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::tables::{JoinedRow, MovieRow};
    use crate::ingest::GraphMaterializer;
    use crate::rdf::TripleStore;

    fn movie_row(
        id: i64,
        revenue: i64,
        budget: i64,
        rating: f64,
        date: &str,
        genres: &str,
    ) -> MovieRow {
        MovieRow {
            id,
            title: Some(format!("Movie {}", id)),
            original_title: None,
            budget: Some(budget),
            revenue: Some(revenue),
            runtime: Some(100.0 + id as f64),
            popularity: None,
            vote_average: Some(rating),
            vote_count: Some(1000),
            release_date: Some(date.into()),
            genres: Some(genres.into()),
            keywords: None,
            production_companies: None,
            production_countries: None,
            spoken_languages: None,
        }
    }

    fn fixture_lens() -> MovieLens {
        let action = "[{'id': 28, 'name': 'Action'}]";
        let crew_ann = "[{'id': 7, 'name': 'Ann Lee', 'job': 'Director', 'department': 'Directing'}]";
        let crew_bo = "[{'id': 8, 'name': 'Bo Ray', 'job': 'Director', 'department': 'Directing'}]";

        let rows = vec![
            JoinedRow {
                movie: movie_row(1, 300, 100, 7.5, "2009-03-01", action),
                cast: None,
                crew: Some(crew_ann.into()),
            },
            JoinedRow {
                movie: movie_row(2, 200, 100, 6.0, "2009-06-01", action),
                cast: None,
                crew: Some(crew_ann.into()),
            },
            JoinedRow {
                movie: movie_row(3, 900, 100, 8.0, "2009-09-01", action),
                cast: None,
                crew: Some(crew_bo.into()),
            },
            // Outside 2009: must not contribute to the director queries.
            JoinedRow {
                movie: movie_row(4, 5000, 100, 9.0, "2012-01-01", action),
                cast: None,
                crew: Some(crew_bo.into()),
            },
        ];

        let mut store = TripleStore::new();
        let mut materializer = GraphMaterializer::new(&mut store).unwrap();
        materializer.declare_role_types().unwrap();
        materializer.materialize(&rows).unwrap();
        MovieLens::from_store(&store).unwrap()
    }

    #[test]
    fn test_top_genres() {
        let lens = fixture_lens();
        let result = top_genres(&lens);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0], vec!["Action".to_string(), "4".to_string()]);
    }

    #[test]
    fn test_movies_released_in_2009() {
        let lens = fixture_lens();
        let result = movies_released_in_2009(&lens);
        assert_eq!(result.rows[0][0], "3");
    }

    #[test]
    fn test_top_directors_action_2009_orders_by_revenue() {
        let lens = fixture_lens();
        let result = top_directors_action_2009(&lens);
        assert_eq!(result.rows.len(), 2);
        // Bo Ray: 900 from one 2009 movie; Ann Lee: 300 + 200 from two.
        assert_eq!(result.rows[0][1], "Bo Ray");
        assert_eq!(result.rows[0][3], "900");
        assert_eq!(result.rows[0][4], "1");
        assert_eq!(result.rows[1][1], "Ann Lee");
        assert_eq!(result.rows[1][3], "500");
        assert_eq!(result.rows[1][4], "2");
    }

    #[test]
    fn test_genre_filter_excludes_non_matching() {
        let mut lens = fixture_lens();
        // Rewriting the genre labels away makes the filtered query empty.
        lens.movies.iter_mut().for_each(|m| m.genres.clear());
        let result = top_directors_action_2009(&lens);
        assert!(result.rows.is_empty());

        let unfiltered = top_directors_2009(&lens);
        assert_eq!(unfiltered.rows.len(), 2);
    }

    #[test]
    fn test_crew_on_high_profit_movies() {
        let lens = fixture_lens();
        // Profits: 200, 100, 800, 4900 -> avg 1500; only movie 4 beats it,
        // and one movie is below the >= 2 threshold.
        let result = crew_on_high_profit_movies(&lens);
        assert!(result.rows.is_empty());
    }
}
