//! People queries, including the shortest acting path between two people.

use super::catalog::people;
use super::{
    Aggregator, ColorPicker, GraphRenderer, color_picker, execute, require_name, require_rows,
};
use crate::config::PresentationOptions;
use crate::models::{NodeLabel, OutputMode, Person, PersonDetails, Rendered, Row};
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// Service for people lookups.
#[derive(Clone)]
pub struct PeopleService {
    aggregator: Aggregator,
    renderer: GraphRenderer,
    colors: Arc<dyn ColorPicker>,
}

impl PeopleService {
    /// Creates a people service.
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

    /// Lists every person.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self, executor), fields(operation = "people.all"))]
    pub async fn all<E: GraphExecutor>(
        &self,
        executor: &E,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Person>>> {
        let rows = execute(executor, &people::all()).await?;
        Ok(self.list(&rows, output))
    }

    /// Fetches one person with their credits and co-actors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no person has this id.
    #[instrument(skip(self, executor), fields(operation = "people.byId"))]
    pub async fn by_id<E: GraphExecutor>(
        &self,
        executor: &E,
        person_id: i64,
        output: OutputMode,
    ) -> Result<Rendered<PersonDetails>> {
        let rows = execute(executor, &people::by_id(person_id)).await?;
        self.single(&rows, output)
    }

    /// Fetches the person with exactly this name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a blank name and
    /// [`Error::NotFound`] if nobody has it.
    #[instrument(skip(self, executor), fields(operation = "people.byName"))]
    pub async fn by_name<E: GraphExecutor>(
        &self,
        executor: &E,
        name: &str,
        output: OutputMode,
    ) -> Result<Rendered<PersonDetails>> {
        let name = require_name(name, "name")?;
        let rows = execute(executor, &people::by_name(name)).await?;
        self.single(&rows, output)
    }

    /// Lists people whose name contains `text`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for blank text and
    /// [`Error::NotFound`] if nobody matches.
    #[instrument(skip(self, executor), fields(operation = "people.search"))]
    pub async fn search<E: GraphExecutor>(
        &self,
        executor: &E,
        text: &str,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Person>>> {
        let text = require_name(text, "name")?;
        let rows = require_rows(execute(executor, &people::search(text)).await?, "person")?;
        Ok(self.list(&rows, output))
    }

    /// Lists the people who acted in a movie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the movie has no actors or does not exist.
    #[instrument(skip(self, executor), fields(operation = "people.byMovie"))]
    pub async fn by_movie<E: GraphExecutor>(
        &self,
        executor: &E,
        movie_id: i64,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Person>>> {
        let rows = require_rows(execute(executor, &people::by_movie(movie_id)).await?, "person")?;
        Ok(self.list(&rows, output))
    }

    /// Lists the people on the shortest acting path between two people.
    ///
    /// Identical names resolve to the one-person path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either name is blank and
    /// [`Error::NotFound`] if no path connects them.
    #[instrument(skip(self, executor), fields(operation = "people.bacon"))]
    pub async fn bacon<E: GraphExecutor>(
        &self,
        executor: &E,
        name1: &str,
        name2: &str,
        output: OutputMode,
    ) -> Result<Rendered<Vec<Person>>> {
        let name1 = require_name(name1, "name1")?;
        let name2 = require_name(name2, "name2")?;
        let query = if name1 == name2 {
            people::bacon_self(name1)
        } else {
            people::bacon(name1, name2)
        };
        let rows = require_rows(execute(executor, &query).await?, "path")?;
        Ok(self.list(&rows, output))
    }

    fn single(&self, rows: &[Row], output: OutputMode) -> Result<Rendered<PersonDetails>> {
        match output {
            OutputMode::Default => self.aggregator.single_person(rows).map(Rendered::Records),
            OutputMode::D3 => {
                let first = rows
                    .get(..1)
                    .ok_or_else(|| Error::NotFound("person not found".to_string()))?;
                Ok(Rendered::Graph(self.renderer.render(
                    first,
                    NodeLabel::Person,
                    self.colors.pick(),
                )))
            },
        }
    }

    fn list(&self, rows: &[Row], output: OutputMode) -> Rendered<Vec<Person>> {
        match output {
            OutputMode::Default => Rendered::Records(self.aggregator.people(rows)),
            OutputMode::D3 => {
                Rendered::Graph(self.renderer.render(rows, NodeLabel::Person, self.colors.pick()))
            },
        }
    }
}

impl std::fmt::Debug for PeopleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeopleService")
            .field("aggregator", &self.aggregator)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}
