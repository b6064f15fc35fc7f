//! Graph materialization
//!
//! One pass over the joined rows turns tabular records into typed graph
//! nodes and edges. Entity nodes shared across rows (persons, genres,
//! companies, countries, languages) are re-emitted on every mention; the
//! store's idempotent insert collapses them onto a single node, so row
//! processing is order-insensitive. The graph only ever grows during a
//! run; the caller serializes it in one terminal step afterwards.

use super::ids;
use super::record::{parse_records, CastCredit, CountryRef, CrewCredit, EntityRef, LanguageRef};
use super::roles::{canonicalize, CanonicalRole};
use super::tables::JoinedRow;
use crate::rdf::{Literal, NamedNode, Object, Predicate, RdfResult, Subject, Triple, TripleStore, Vocabulary};
use tracing::{debug, info, warn};

/// Counters reported after a materialization run
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterializeStats {
    /// Joined rows processed
    pub rows: usize,
    /// Triples newly added (idempotent re-inserts not counted)
    pub triples_added: usize,
    /// Crew credits dropped because their job title made no valid IRI
    pub crew_skipped: usize,
}

/// Builds the film graph inside an exclusively borrowed store
pub struct GraphMaterializer<'a> {
    store: &'a mut TripleStore,
    vocab: Vocabulary,
    stats: MaterializeStats,
}

impl<'a> GraphMaterializer<'a> {
    /// Create a materializer over a store that already holds the base schema
    pub fn new(store: &'a mut TripleStore) -> RdfResult<Self> {
        Ok(Self {
            store,
            vocab: Vocabulary::new()?,
            stats: MaterializeStats::default(),
        })
    }

    /// Declare the role taxonomy: the RoleType class, the roleType
    /// property, and one individual per canonical role category,
    /// independent of whether any crew credit ends up using it
    pub fn declare_role_types(&mut self) -> RdfResult<()> {
        let schema = self.vocab.schema.clone();
        let role_type_class = self.vocab.classes.role_type.clone();
        let crew_role_class = self.vocab.classes.crew_role.clone();
        let role_type_prop = self.vocab.props.role_type.clone();
        let label_prop = self.vocab.props.label.clone();

        self.add(role_type_class.clone(), &schema.rdf_type, schema.rdfs_class.clone());
        self.add(
            role_type_prop.as_named_node().clone(),
            &schema.rdf_type,
            schema.rdf_property.clone(),
        );
        self.add(
            role_type_prop.as_named_node().clone(),
            &schema.rdfs_domain,
            crew_role_class,
        );
        self.add(
            role_type_prop.as_named_node().clone(),
            &schema.rdfs_range,
            role_type_class.clone(),
        );

        for role in CanonicalRole::ALL {
            let iri = ids::role_iri(role.as_str())?;
            self.add(iri.clone(), &schema.rdf_type, role_type_class.clone());
            self.add(iri, &label_prop, Literal::string(role.as_str()));
        }
        Ok(())
    }

    /// Materialize every joined row and return the run counters
    pub fn materialize(&mut self, rows: &[JoinedRow]) -> RdfResult<MaterializeStats> {
        for row in rows {
            self.emit_row(row)?;
            self.stats.rows += 1;
        }
        info!(
            rows = self.stats.rows,
            triples_added = self.stats.triples_added,
            crew_skipped = self.stats.crew_skipped,
            "materialization complete"
        );
        Ok(self.stats)
    }

    fn emit_row(&mut self, row: &JoinedRow) -> RdfResult<()> {
        let movie = ids::movie_iri(row.movie.id)?;
        debug!(movie_id = row.movie.id, "materializing row");

        self.emit_movie_scalars(&movie, row)?;
        self.emit_descriptive_fields(&movie, row)?;
        self.emit_cast(&movie, row)?;
        self.emit_crew(&movie, row)?;
        Ok(())
    }

    fn emit_movie_scalars(&mut self, movie: &NamedNode, row: &JoinedRow) -> RdfResult<()> {
        let props = self.vocab.props.clone();
        let rdf_type = self.vocab.schema.rdf_type.clone();
        let movie_class = self.vocab.classes.movie.clone();

        self.add(movie.clone(), &rdf_type, movie_class);

        if let Some(title) = row.movie.title.as_deref() {
            self.add(movie.clone(), &props.movie_title, Literal::string(title));
        }
        if let Some(original) = row.movie.original_title.as_deref() {
            self.add(movie.clone(), &props.original_title, Literal::string(original));
        }
        if let Some(budget) = row.movie.budget {
            self.add(movie.clone(), &props.budget, Literal::integer(budget));
        }
        if let Some(revenue) = row.movie.revenue {
            self.add(movie.clone(), &props.revenue, Literal::integer(revenue));
        }
        // Profit is materialized rather than derived at query time, and only
        // when strictly positive.
        if let (Some(budget), Some(revenue)) = (row.movie.budget, row.movie.revenue) {
            let profit = revenue - budget;
            if profit > 0 {
                self.add(movie.clone(), &props.profit, Literal::integer(profit));
            }
        }
        if let Some(runtime) = row.movie.runtime {
            self.add(movie.clone(), &props.runtime, Literal::decimal(runtime));
        }
        if let Some(popularity) = row.movie.popularity {
            self.add(movie.clone(), &props.popularity, Literal::decimal(popularity));
        }
        if let Some(vote_average) = row.movie.vote_average {
            self.add(movie.clone(), &props.vote_average, Literal::decimal(vote_average));
        }
        if let Some(vote_count) = row.movie.vote_count {
            self.add(movie.clone(), &props.vote_count, Literal::integer(vote_count));
        }
        if let Some(date) = row.movie.release_date.as_deref() {
            if !date.is_empty() {
                self.add(movie.clone(), &props.release_date, Literal::date(date));
            }
        }
        Ok(())
    }

    fn emit_descriptive_fields(&mut self, movie: &NamedNode, row: &JoinedRow) -> RdfResult<()> {
        let props = self.vocab.props.clone();
        let classes = self.vocab.classes.clone();

        for genre in parse_records::<EntityRef>(row.movie.genres.as_deref()) {
            let Some(id) = genre.id else { continue };
            let iri = ids::genre_iri(id)?;
            self.emit_labeled_entity(&iri, &classes.genre, genre.name.as_deref());
            self.add(movie.clone(), &props.has_genre, iri);
        }

        for keyword in parse_records::<EntityRef>(row.movie.keywords.as_deref()) {
            let Some(id) = keyword.id else { continue };
            let iri = ids::keyword_iri(id)?;
            self.emit_labeled_entity(&iri, &classes.keyword, keyword.name.as_deref());
            self.add(movie.clone(), &props.has_keyword, iri);
        }

        for company in parse_records::<EntityRef>(row.movie.production_companies.as_deref()) {
            let Some(id) = company.id else { continue };
            let iri = ids::company_iri(id)?;
            self.emit_labeled_entity(&iri, &classes.company, company.name.as_deref());
            self.add(movie.clone(), &props.produced_by, iri);
        }

        for country in parse_records::<CountryRef>(row.movie.production_countries.as_deref()) {
            let Some(code) = country.code.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let iri = match ids::country_iri(code) {
                Ok(iri) => iri,
                Err(e) => {
                    warn!(code, error = %e, "skipping country with invalid code");
                    continue;
                }
            };
            self.emit_labeled_entity(&iri, &classes.country, country.name.as_deref());
            self.add(movie.clone(), &props.produced_in_country, iri);
        }

        for language in parse_records::<LanguageRef>(row.movie.spoken_languages.as_deref()) {
            let Some(code) = language.code.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let iri = match ids::language_iri(code) {
                Ok(iri) => iri,
                Err(e) => {
                    warn!(code, error = %e, "skipping language with invalid code");
                    continue;
                }
            };
            self.emit_labeled_entity(&iri, &classes.language, language.name.as_deref());
            self.add(movie.clone(), &props.spoken_language, iri);
        }
        Ok(())
    }

    fn emit_cast(&mut self, movie: &NamedNode, row: &JoinedRow) -> RdfResult<()> {
        let props = self.vocab.props.clone();
        let classes = self.vocab.classes.clone();
        let rdf_type = self.vocab.schema.rdf_type.clone();

        for credit in parse_records::<CastCredit>(row.cast.as_deref()) {
            let Some(person_id) = credit.id else { continue };
            let person = ids::person_iri(person_id)?;
            self.emit_labeled_entity(&person, &classes.person, credit.name.as_deref());

            let order = credit.order.unwrap_or(0);
            let appearance = ids::cast_iri(row.movie.id, person_id, order)?;
            self.add(appearance.clone(), &rdf_type, classes.cast_role.clone());
            self.add(movie.clone(), &props.has_cast, appearance.clone());
            self.add(appearance.clone(), &props.played_by, person);
            if let Some(character) = credit.character.as_deref().filter(|c| !c.is_empty()) {
                self.add(
                    appearance.clone(),
                    &props.character_name,
                    Literal::string(character),
                );
            }
            self.add(appearance, &props.cast_order, Literal::integer(order));
        }
        Ok(())
    }

    fn emit_crew(&mut self, movie: &NamedNode, row: &JoinedRow) -> RdfResult<()> {
        let props = self.vocab.props.clone();
        let classes = self.vocab.classes.clone();
        let rdf_type = self.vocab.schema.rdf_type.clone();

        for credit in parse_records::<CrewCredit>(row.crew.as_deref()) {
            let Some(person_id) = credit.id else { continue };
            let Some(job) = credit.job.as_deref().filter(|j| !j.is_empty()) else {
                continue;
            };

            let person = ids::person_iri(person_id)?;
            self.emit_labeled_entity(&person, &classes.person, credit.name.as_deref());

            let appearance = match ids::crew_iri(row.movie.id, person_id, job) {
                Ok(iri) => iri,
                Err(e) => {
                    self.stats.crew_skipped += 1;
                    warn!(job, error = %e, "skipping crew credit with IRI-invalid job");
                    continue;
                }
            };

            self.add(appearance.clone(), &rdf_type, classes.crew_role.clone());
            self.add(movie.clone(), &props.has_crew, appearance.clone());
            self.add(appearance.clone(), &props.credits_person, person.clone());
            self.add(appearance.clone(), &props.crew_job, Literal::string(job));
            if let Some(dept) = credit.department.as_deref().filter(|d| !d.is_empty()) {
                self.add(appearance.clone(), &props.crew_department, Literal::string(dept));
            }

            let role = canonicalize(job, credit.department.as_deref());
            let role_node = ids::role_iri(role.as_str())?;
            self.add(appearance, &props.role_type, role_node);

            // Derived convenience edge. Deliberately a substring test on the
            // raw title, not a check against the canonical role: "Assistant
            // Director" fires too.
            if job.to_lowercase().contains("director") {
                self.add(movie.clone(), &props.directed_by, person);
            }
        }
        Ok(())
    }

    /// Emit an entity node with its type tag and optional label
    fn emit_labeled_entity(&mut self, iri: &NamedNode, class: &NamedNode, label: Option<&str>) {
        let rdf_type = self.vocab.schema.rdf_type.clone();
        let label_prop = self.vocab.props.label.clone();
        self.add(iri.clone(), &rdf_type, class.clone());
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            self.add(iri.clone(), &label_prop, Literal::string(label));
        }
    }

    fn add(&mut self, subject: impl Into<Subject>, predicate: &Predicate, object: impl Into<Object>) {
        if self
            .store
            .insert(Triple::new(subject.into(), predicate.clone(), object.into()))
        {
            self.stats.triples_added += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::tables::MovieRow;
    use crate::rdf::TriplePattern;

    fn blank_movie(id: i64) -> MovieRow {
        MovieRow {
            id,
            title: None,
            original_title: None,
            budget: None,
            revenue: None,
            runtime: None,
            popularity: None,
            vote_average: None,
            vote_count: None,
            release_date: None,
            genres: None,
            keywords: None,
            production_companies: None,
            production_countries: None,
            spoken_languages: None,
        }
    }

    fn materialize(rows: &[JoinedRow]) -> TripleStore {
        let mut store = TripleStore::new();
        let mut materializer = GraphMaterializer::new(&mut store).unwrap();
        materializer.declare_role_types().unwrap();
        materializer.materialize(rows).unwrap();
        store
    }

    fn fr(local: &str) -> Predicate {
        Predicate::new(format!("http://example.org/film-rating#{}", local)).unwrap()
    }

    fn movie_subject(id: i64) -> Subject {
        Subject::from(ids::movie_iri(id).unwrap())
    }

    #[test]
    fn test_profit_emitted_only_when_strictly_positive() {
        let mut profitable = blank_movie(1);
        profitable.budget = Some(1_000_000);
        profitable.revenue = Some(3_000_000);

        let mut losing = blank_movie(2);
        losing.budget = Some(3_000_000);
        losing.revenue = Some(1_000_000);

        let mut unknown = blank_movie(3);
        unknown.revenue = Some(1_000_000);

        let rows: Vec<JoinedRow> = [profitable, losing, unknown]
            .into_iter()
            .map(|movie| JoinedRow {
                movie,
                cast: None,
                crew: None,
            })
            .collect();
        let store = materialize(&rows);

        let profit = store.literal(&movie_subject(1), &fr("profit")).unwrap();
        assert_eq!(profit.as_integer(), Some(2_000_000));
        assert!(store.literal(&movie_subject(2), &fr("profit")).is_none());
        assert!(store.literal(&movie_subject(3), &fr("profit")).is_none());
    }

    #[test]
    fn test_idempotent_rematerialization() {
        let mut movie = blank_movie(10);
        movie.title = Some("Twice".into());
        movie.genres = Some("[{'id': 28, 'name': 'Action'}]".into());
        let row = JoinedRow {
            movie,
            cast: Some("[{'id': 5, 'name': 'A', 'order': 0}]".into()),
            crew: Some("[{'id': 6, 'name': 'B', 'job': 'Director', 'department': 'Directing'}]".into()),
        };

        let once = materialize(std::slice::from_ref(&row));
        let twice = materialize(&[row.clone(), row]);
        assert_eq!(once.len(), twice.len());
        for t in once.iter() {
            assert!(twice.contains(t));
        }
    }

    #[test]
    fn test_crew_composite_key_disambiguates_jobs() {
        let row = JoinedRow {
            movie: blank_movie(20),
            cast: None,
            crew: Some(
                "[{'id': 7, 'name': 'Ann Lee', 'job': 'Director', 'department': 'Directing'}, \
                  {'id': 7, 'name': 'Ann Lee', 'job': 'Writer', 'department': 'Writing'}]"
                    .into(),
            ),
        };
        let store = materialize(&[row]);

        let crew_edges = store.objects(&movie_subject(20), &fr("hasCrew"));
        assert_eq!(crew_edges.len(), 2);

        let director = Subject::from(ids::crew_iri(20, 7, "Director").unwrap());
        let writer = Subject::from(ids::crew_iri(20, 7, "Writer").unwrap());
        assert_eq!(
            store.literal(&director, &fr("crewJob")).unwrap().value(),
            "Director"
        );
        assert_eq!(
            store.literal(&writer, &fr("crewJob")).unwrap().value(),
            "Writer"
        );

        // Both roles credit the same person node.
        let person = Object::from(ids::person_iri(7).unwrap());
        assert_eq!(
            store.subjects_with(&fr("creditsPerson"), &person).len(),
            2
        );
    }

    #[test]
    fn test_directed_by_substring_heuristic() {
        let row = JoinedRow {
            movie: blank_movie(30),
            cast: None,
            crew: Some(
                "[{'id': 8, 'name': 'C', 'job': 'Co-Director', 'department': 'Directing'}, \
                  {'id': 9, 'name': 'D', 'job': 'Editor', 'department': 'Editing'}]"
                    .into(),
            ),
        };
        let store = materialize(&[row]);

        let directed = store.objects(&movie_subject(30), &fr("directedBy"));
        assert_eq!(directed.len(), 1);
        assert_eq!(
            directed[0].as_iri(),
            Some(ids::person_iri(8).unwrap().as_str())
        );
    }

    #[test]
    fn test_cast_order_defaults_to_zero() {
        let row = JoinedRow {
            movie: blank_movie(40),
            cast: Some("[{'id': 11, 'name': 'E', 'character': 'Hero'}]".into()),
            crew: None,
        };
        let store = materialize(&[row]);

        let appearance = Subject::from(ids::cast_iri(40, 11, 0).unwrap());
        assert_eq!(
            store.literal(&appearance, &fr("castOrder")).unwrap().as_integer(),
            Some(0)
        );
        assert_eq!(
            store.literal(&appearance, &fr("characterName")).unwrap().value(),
            "Hero"
        );
    }

    #[test]
    fn test_missing_natural_keys_skip_single_entities() {
        let mut movie = blank_movie(50);
        movie.genres = Some("[{'name': 'No Id'}, {'id': 18, 'name': 'Drama'}]".into());
        let row = JoinedRow {
            movie,
            cast: Some("[{'name': 'anonymous'}]".into()),
            crew: Some("[{'id': 12, 'name': 'F'}]".into()), // no job: skipped
        };
        let store = materialize(&[row]);

        assert_eq!(store.objects(&movie_subject(50), &fr("hasGenre")).len(), 1);
        assert!(store.objects(&movie_subject(50), &fr("hasCast")).is_empty());
        assert!(store.objects(&movie_subject(50), &fr("hasCrew")).is_empty());
    }

    #[test]
    fn test_malformed_nested_field_contributes_nothing() {
        let mut movie = blank_movie(60);
        movie.genres = Some("[{'id': 28, broken".into());
        let row = JoinedRow {
            movie,
            cast: None,
            crew: None,
        };
        let store = materialize(&[row]);
        assert!(store.objects(&movie_subject(60), &fr("hasGenre")).is_empty());
    }

    #[test]
    fn test_role_types_declared_up_front() {
        let store = materialize(&[]);
        let role_class = Object::from(
            NamedNode::new("http://example.org/film-rating#RoleType").unwrap(),
        );
        let declared = store.subjects_with(&fr("roleType"), &role_class);
        assert!(declared.is_empty()); // roleType edges come only from credits

        let pattern = TriplePattern::new(
            None,
            Some(Predicate::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type").unwrap()),
            Some(role_class),
        );
        assert_eq!(store.query(&pattern).len(), CanonicalRole::ALL.len());
    }

    #[test]
    fn test_unrecognized_role_gets_default_bucket() {
        let row = JoinedRow {
            movie: blank_movie(70),
            cast: None,
            crew: Some("[{'id': 13, 'name': 'G', 'job': 'Gaffer', 'department': 'Lighting'}]".into()),
        };
        let store = materialize(&[row]);

        let appearance = Subject::from(ids::crew_iri(70, 13, "Gaffer").unwrap());
        let role = store.objects(&appearance, &fr("roleType"));
        assert_eq!(role.len(), 1);
        assert_eq!(
            role[0].as_iri(),
            Some("http://example.org/film-rating#role/OtherCrewRole")
        );
    }
}
