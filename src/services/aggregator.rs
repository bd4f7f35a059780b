//! Result aggregation: rows into records.
//!
//! Two modes:
//!
//! - **single-detail**: the first row becomes one record with every detail
//!   collection attached; zero rows is [`Error::NotFound`]
//! - **list**: every row's primary node becomes one record, in row order
//!
//! Collections keep whatever the traversal collected, including all-null
//! placeholder entries produced by an optional join that matched nothing,
//! unless [`PresentationOptions::drop_placeholders`] is set.

use crate::config::PresentationOptions;
use crate::models::{
    ActingCredit, CastMember, Movie, MovieCredit, MovieDetails, Person, PersonDetails,
    Placeholder, Properties, Row, Tag, node_properties,
};
use crate::services::projector::{project_movie, project_person};
use crate::{Error, Result};
use serde_json::Value;

/// Folds traversal rows into records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    drop_placeholders: bool,
}

impl Aggregator {
    /// Creates an aggregator from presentation options.
    #[must_use]
    pub const fn new(options: &PresentationOptions) -> Self {
        Self {
            drop_placeholders: options.drop_placeholders,
        }
    }

    /// Aggregates the first row into a detailed movie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there are no rows, and
    /// [`Error::OperationFailed`] if the first row has no `movie` node.
    pub fn single_movie(&self, rows: &[Row]) -> Result<MovieDetails> {
        let row = rows
            .first()
            .ok_or_else(|| Error::NotFound("movie not found".to_string()))?;
        let movie = project_movie(primary_node(row, "movie")?, None);

        let related = row
            .list("related")
            .iter()
            .filter_map(node_properties)
            .map(|props| project_movie(props, None))
            .filter(|related| related.id.is_none() || related.id != movie.id)
            .collect();

        Ok(MovieDetails {
            actors: self.entries(row, "actors", CastMember::from_properties),
            related,
            keywords: tags(row, "keywords"),
            genres: tags(row, "genres"),
            directors: people(row, "directors"),
            producers: people(row, "producers"),
            writers: people(row, "writers"),
            movie,
        })
    }

    /// Aggregates the first row into a detailed person.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there are no rows, and
    /// [`Error::OperationFailed`] if the first row has no `person` node.
    pub fn single_person(&self, rows: &[Row]) -> Result<PersonDetails> {
        let row = rows
            .first()
            .ok_or_else(|| Error::NotFound("person not found".to_string()))?;
        let person = project_person(primary_node(row, "person")?);

        Ok(PersonDetails {
            directed: self.entries(row, "directed", MovieCredit::from_properties),
            produced: self.entries(row, "produced", MovieCredit::from_properties),
            wrote: self.entries(row, "wrote", MovieCredit::from_properties),
            acted_in: self.entries(row, "actedIn", ActingCredit::from_properties),
            related: self.entries(row, "related", CastMember::from_properties),
            person,
        })
    }

    /// Projects every row's `movie` node, skipping rows without one.
    #[must_use]
    pub fn movies(&self, rows: &[Row]) -> Vec<Movie> {
        rows.iter()
            .filter_map(|row| row.node("movie"))
            .map(|props| project_movie(props, None))
            .collect()
    }

    /// Projects every row's `person` node, skipping rows without one.
    #[must_use]
    pub fn people(&self, rows: &[Row]) -> Vec<Person> {
        rows.iter()
            .filter_map(|row| row.node("person"))
            .map(project_person)
            .collect()
    }

    fn entries<T: Placeholder>(
        &self,
        row: &Row,
        column: &str,
        build: impl Fn(&Properties) -> T,
    ) -> Vec<T> {
        row.list(column)
            .iter()
            .filter_map(Value::as_object)
            .map(build)
            .filter(|entry| !(self.drop_placeholders && entry.is_placeholder()))
            .collect()
    }
}

fn primary_node<'a>(row: &'a Row, column: &str) -> Result<&'a Properties> {
    row.node(column).ok_or_else(|| Error::OperationFailed {
        operation: "aggregate".to_string(),
        cause: format!("result row has no '{column}' node"),
    })
}

fn tags(row: &Row, column: &str) -> Vec<Tag> {
    row.list(column)
        .iter()
        .filter_map(node_properties)
        .map(Tag::from_properties)
        .collect()
}

fn people(row: &Row, column: &str) -> Vec<Person> {
    row.list(column)
        .iter()
        .filter_map(node_properties)
        .map(project_person)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matrix_row() -> Row {
        Row::new()
            .with("movie", json!({"id": 603, "title": "The Matrix", "runtime": {"low": 136, "high": 0}}))
            .with(
                "actors",
                json!([
                    {"name": "Keanu Reeves", "id": 6384, "profileImageUrl": "http://img/keanu.jpg", "role": "Neo"},
                    {"name": "Carrie-Anne Moss", "id": 530, "profileImageUrl": null, "role": "Trinity"}
                ]),
            )
            .with(
                "related",
                json!([{"id": 604, "title": "The Matrix Reloaded"}, {"id": 603, "title": "The Matrix"}]),
            )
            .with("keywords", json!([{"name": "simulation"}]))
            .with("genres", json!([{"name": "Action"}, {"name": "Science Fiction"}]))
            .with("directors", json!([{"id": 9339, "name": "Lana Wachowski"}]))
            .with("producers", json!([]))
            .with("writers", json!(null))
    }

    #[test]
    fn test_single_movie_attaches_collections() {
        let details = Aggregator::default().single_movie(&[matrix_row()]).unwrap();
        assert_eq!(details.movie.id, Some(603));
        assert_eq!(details.movie.runtime, Some(136));
        assert_eq!(details.actors.len(), 2);
        assert_eq!(details.actors[0].role.as_deref(), Some("Neo"));
        assert_eq!(details.keywords[0].name.as_deref(), Some("simulation"));
        assert_eq!(details.genres.len(), 2);
        assert_eq!(details.directors[0].name.as_deref(), Some("Lana Wachowski"));
        assert!(details.producers.is_empty());
        assert!(details.writers.is_empty());
    }

    #[test]
    fn test_related_never_contains_subject() {
        let details = Aggregator::default().single_movie(&[matrix_row()]).unwrap();
        assert_eq!(details.related.len(), 1);
        assert!(details.related.iter().all(|m| m.id != Some(603)));
    }

    #[test]
    fn test_single_uses_first_row_only() {
        let second = Row::new().with("movie", json!({"id": 604, "title": "The Matrix Reloaded"}));
        let details = Aggregator::default()
            .single_movie(&[matrix_row(), second])
            .unwrap();
        assert_eq!(details.movie.id, Some(603));
    }

    #[test]
    fn test_empty_rows_not_found() {
        let aggregator = Aggregator::default();
        let err = aggregator.single_movie(&[]).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref msg) if msg == "movie not found"));
        let err = aggregator.single_person(&[]).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref msg) if msg == "person not found"));
    }

    #[test]
    fn test_missing_primary_column_is_failure() {
        let row = Row::new().with("actors", json!([]));
        let err = Aggregator::default().single_movie(&[row]).unwrap_err();
        assert!(matches!(err, Error::OperationFailed { .. }));
    }

    fn lonely_person_row() -> Row {
        let placeholder = json!([{"name": null, "id": null, "imageUrl": null}]);
        Row::new()
            .with("person", json!({"id": 1, "name": "Nobody Special", "born": 1970}))
            .with("directed", placeholder.clone())
            .with("produced", placeholder.clone())
            .with("wrote", placeholder)
            .with(
                "actedIn",
                json!([{"name": "Extras", "id": 77, "imageUrl": null, "role": "Crowd"}]),
            )
            .with(
                "related",
                json!([{"name": null, "id": null, "profileImageUrl": null, "role": null}]),
            )
    }

    #[test]
    fn test_placeholders_pass_through_by_default() {
        let details = Aggregator::default()
            .single_person(&[lonely_person_row()])
            .unwrap();
        assert_eq!(details.directed.len(), 1);
        assert!(details.directed[0].is_placeholder());
        assert_eq!(details.related.len(), 1);
        assert_eq!(details.acted_in[0].role.as_deref(), Some("Crowd"));
    }

    #[test]
    fn test_placeholders_dropped_when_configured() {
        let options = PresentationOptions {
            drop_placeholders: true,
            ..PresentationOptions::default()
        };
        let details = Aggregator::new(&options)
            .single_person(&[lonely_person_row()])
            .unwrap();
        assert!(details.directed.is_empty());
        assert!(details.produced.is_empty());
        assert!(details.wrote.is_empty());
        assert!(details.related.is_empty());
        assert_eq!(details.acted_in.len(), 1);
    }

    #[test]
    fn test_list_mode_preserves_order() {
        let rows = vec![
            Row::new().with("person", json!({"id": 3, "name": "C"})),
            Row::new().with("person", json!({"id": 1, "name": "A"})),
            Row::new().with("person", json!({"id": 2, "name": "B"})),
        ];
        let ids: Vec<_> = Aggregator::default()
            .people(&rows)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
        assert!(Aggregator::default().movies(&[]).is_empty());
    }
}
