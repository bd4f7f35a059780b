//! Movie queries.

use super::catalog::movies;
use super::{Aggregator, ColorPicker, GraphRenderer, color_picker, execute, require_name};
use crate::config::PresentationOptions;
use crate::models::{Movie, MovieDetails, NodeLabel, OutputMode, Rendered, Row};
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// Service for movie lookups.
///
/// Stateless apart from presentation settings; one instance serves every
/// request. The executor is supplied per call.
#[derive(Clone)]
pub struct MovieService {
    aggregator: Aggregator,
    renderer: GraphRenderer,
    colors: Arc<dyn ColorPicker>,
}

impl MovieService {
    /// Creates a movie service.
    #[must_use]
    pub fn new(options: &PresentationOptions) -> Self {
        Self {
            aggregator: Aggregator::new(options),
            renderer: GraphRenderer::new(options),
            colors: color_picker(options),
        }
    }

    /// Replaces the color source used for graph output.
    #[must_use]
    pub fn with_colors(mut self, colors: Arc<dyn ColorPicker>) -> Self {
        self.colors = colors;
        self
    }

    /// Lists every movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self, executor), fields(operation = "movies.all"))]
    pub async fn all<E: GraphExecutor>(
        &self,
        executor: &E,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Movie>>> {
        let rows = execute(executor, &movies::all()).await?;
        Ok(self.list(&rows, output))
    }

    /// Fetches one movie with its cast, crew, keywords, and related movies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no movie has this id.
    #[instrument(skip(self, executor), fields(operation = "movies.byId"))]
    pub async fn by_id<E: GraphExecutor>(
        &self,
        executor: &E,
        movie_id: i64,
        output: OutputMode,
    ) -> Result<Rendered<MovieDetails>> {
        let rows = execute(executor, &movies::by_id(movie_id)).await?;
        self.single(&rows, output)
    }

    /// Fetches the first movie whose title contains `title`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank title and
    /// [`Error::NotFound`] if nothing matches.
    #[instrument(skip(self, executor), fields(operation = "movies.byName"))]
    pub async fn by_name<E: GraphExecutor>(
        &self,
        executor: &E,
        title: &str,
        output: OutputMode,
    ) -> Result<Rendered<MovieDetails>> {
        let title = require_name(title, "name")?;
        let rows = execute(executor, &movies::by_name(title)).await?;
        self.single(&rows, output)
    }

    /// Lists the movies a person acted in.
    ///
    /// An unknown person yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self, executor), fields(operation = "movies.byActor"))]
    pub async fn by_actor<E: GraphExecutor>(
        &self,
        executor: &E,
        person_id: i64,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Movie>>> {
        let rows = execute(executor, &movies::by_actor(person_id)).await?;
        Ok(self.list(&rows, output))
    }

    fn single(&self, rows: &[Row], output: OutputMode) -> Result<Rendered<MovieDetails>> {
        match output {
            OutputMode::Default => self.aggregator.single_movie(rows).map(Rendered::Records),
            OutputMode::D3 => {
                let first = rows
                    .get(..1)
                    .ok_or_else(|| Error::NotFound("movie not found".to_string()))?;
                Ok(Rendered::Graph(self.renderer.render(
                    first,
                    NodeLabel::Movie,
                    self.colors.pick(),
                )))
            },
        }
    }

    fn list(&self, rows: &[Row], output: OutputMode) -> Rendered<Vec<Movie>> {
        match output {
            OutputMode::Default => Rendered::Records(self.aggregator.movies(rows)),
            OutputMode::D3 => {
                Rendered::Graph(self.renderer.render(rows, NodeLabel::Movie, self.colors.pick()))
            },
        }
    }
}

impl std::fmt::Debug for MovieService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieService")
            .field("aggregator", &self.aggregator)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RgbColor;
    use crate::services::FixedColor;
    use crate::storage::RecordedExecutor;
    use serde_json::json;

    fn service() -> MovieService {
        MovieService::new(&PresentationOptions::default())
            .with_colors(Arc::new(FixedColor(RgbColor::new(1, 2, 3))))
    }

    fn matrix() -> Row {
        Row::new()
            .with("movie", json!({"id": 603, "title": "The Matrix", "runtime": 136}))
            .with(
                "actors",
                json!([{"name": "Keanu Reeves", "id": 6384, "profileImageUrl": null, "role": "Neo"}]),
            )
            .with("related", json!([]))
    }

    #[tokio::test]
    async fn test_by_id_not_found_in_both_modes() {
        let executor = RecordedExecutor::new();
        for output in [OutputMode::Default, OutputMode::D3] {
            let err = service().by_id(&executor, 42, output).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn test_by_id_records() {
        let executor = RecordedExecutor::new().respond("movies.byId", vec![matrix()]);
        let details = service()
            .by_id(&executor, 603, OutputMode::Default)
            .await
            .unwrap()
            .records()
            .unwrap();
        assert_eq!(details.movie.id, Some(603));
        assert_eq!(details.actors.len(), 1);
        assert_eq!(executor.executed()[0].get_param("movieId"), Some(&json!(603)));
    }

    #[tokio::test]
    async fn test_by_id_graph() {
        let executor = RecordedExecutor::new().respond("movies.byId", vec![matrix()]);
        let graph = service()
            .by_id(&executor, 603, OutputMode::D3)
            .await
            .unwrap()
            .graph()
            .unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        assert!(graph.nodes.iter().all(|n| n.color == RgbColor::new(1, 2, 3)));
    }

    #[tokio::test]
    async fn test_by_name_rejects_blank() {
        let executor = RecordedExecutor::new();
        let err = service()
            .by_name(&executor, "  ", OutputMode::Default)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(executor.executed().is_empty());
    }

    #[tokio::test]
    async fn test_by_actor_empty_is_success() {
        let executor = RecordedExecutor::new();
        let movies = service()
            .by_actor(&executor, 1, OutputMode::Default)
            .await
            .unwrap()
            .records()
            .unwrap();
        assert!(movies.is_empty());
    }
}
