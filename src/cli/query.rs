//! Query commands: one service call, JSON out.

use super::Commands;
use crate::config::PresentationOptions;
use crate::models::OutputMode;
use crate::services::{MovieService, PeopleService, parse_id};
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use serde::Serialize;

/// Runs query commands against an executor.
#[derive(Debug, Clone)]
pub struct QueryCommand {
    movies: MovieService,
    people: PeopleService,
}

impl QueryCommand {
    /// Creates a query command with the given presentation options.
    #[must_use]
    pub fn new(options: &PresentationOptions) -> Self {
        Self {
            movies: MovieService::new(options),
            people: PeopleService::new(options),
        }
    }

    /// Runs `command` and returns its result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument is invalid, the lookup fails, or
    /// `command` is not a query command.
    pub async fn execute<E: GraphExecutor>(&self, executor: &E, command: &Commands) -> Result<String> {
        match command {
            Commands::Movies { actor, output } => {
                let output = OutputMode::parse(output);
                match actor {
                    Some(id) => to_json(&self.movies.by_actor(executor, parse_id(id)?, output).await?),
                    None => to_json(&self.movies.all(executor, output).await?),
                }
            },
            Commands::Movie { id, name, output } => {
                let output = OutputMode::parse(output);
                match (id, name) {
                    (Some(id), _) => to_json(&self.movies.by_id(executor, parse_id(id)?, output).await?),
                    (None, Some(name)) => to_json(&self.movies.by_name(executor, name, output).await?),
                    (None, None) => Err(Error::InvalidInput("movie id or --name is required".to_string())),
                }
            },
            Commands::People { movie, output } => {
                let output = OutputMode::parse(output);
                match movie {
                    Some(id) => to_json(&self.people.by_movie(executor, parse_id(id)?, output).await?),
                    None => to_json(&self.people.all(executor, output).await?),
                }
            },
            Commands::Person {
                id,
                name,
                search,
                output,
            } => {
                let output = OutputMode::parse(output);
                match (id, name, search) {
                    (Some(id), _, _) => to_json(&self.people.by_id(executor, parse_id(id)?, output).await?),
                    (None, Some(name), _) => to_json(&self.people.by_name(executor, name, output).await?),
                    (None, None, Some(text)) => to_json(&self.people.search(executor, text, output).await?),
                    (None, None, None) => Err(Error::InvalidInput(
                        "person id, --name or --search is required".to_string(),
                    )),
                }
            },
            Commands::Bacon {
                name1,
                name2,
                output,
            } => to_json(
                &self
                    .people
                    .bacon(executor, name1, name2, OutputMode::parse(output))
                    .await?,
            ),
            Commands::Serve { .. } | Commands::Config { .. } => Err(Error::InvalidInput(
                "not a query command".to_string(),
            )),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::operation("serialize_output", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Row;
    use crate::storage::RecordedExecutor;
    use serde_json::{Value, json};

    fn command() -> QueryCommand {
        QueryCommand::new(&PresentationOptions::default())
    }

    #[tokio::test]
    async fn test_movie_by_id_prints_json() {
        let executor = RecordedExecutor::new().respond(
            "movies.byId",
            vec![Row::new().with("movie", json!({"id": 603, "title": "The Matrix"}))],
        );
        let out = command()
            .execute(
                &executor,
                &Commands::Movie {
                    id: Some("603".to_string()),
                    name: None,
                    output: "default".to_string(),
                },
            )
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["title"], json!("The Matrix"));
        assert_eq!(value["actors"], json!([]));
    }

    #[tokio::test]
    async fn test_bad_id_rejected_before_query() {
        let executor = RecordedExecutor::new();
        let err = command()
            .execute(
                &executor,
                &Commands::People {
                    movie: Some("six-oh-three".to_string()),
                    output: "default".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_person_search_graph() {
        let executor = RecordedExecutor::new().respond(
            "people.search",
            vec![Row::new().with("person", json!({"id": 6384, "name": "Keanu Reeves"}))],
        );
        let out = command()
            .execute(
                &executor,
                &Commands::Person {
                    id: None,
                    name: None,
                    search: Some("keanu".to_string()),
                    output: "d3".to_string(),
                },
            )
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["nodes"][0]["label"], json!("person"));
        assert_eq!(value["links"], json!([]));
    }

    #[tokio::test]
    async fn test_serve_is_not_a_query() {
        let executor = RecordedExecutor::new();
        let err = command()
            .execute(&executor, &Commands::Serve { port: None })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
