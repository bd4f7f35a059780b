//! Recorded executor for tests and offline runs.
//!
//! Replays canned rows keyed by query name and, optionally, by the exact
//! bound parameters. Queries with no recorded response return zero rows, the
//! way a database without matching data would.
//!
//! # Fixture Format
//!
//! ```json
//! {
//!   "responses": [
//!     {"query": "movies.byId", "params": {"movieId": 603}, "rows": [{"movie": {"id": 603}}]},
//!     {"query": "movies.all", "rows": []}
//!   ]
//! }
//! ```

use crate::models::{CypherQuery, Properties, Row};
use crate::storage::traits::GraphExecutor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// A canned response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedResponse {
    /// Catalog name the response answers.
    pub query: String,
    /// Parameters that must match exactly; `None` matches any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Properties>,
    /// Rows to return.
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Default, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    responses: Vec<RecordedResponse>,
}

/// Executor that replays recorded rows.
///
/// Uses a `Mutex` for the execution log so it can be shared across tasks.
#[derive(Debug, Default)]
pub struct RecordedExecutor {
    responses: Vec<RecordedResponse>,
    failures: HashMap<String, String>,
    executed: Mutex<Vec<CypherQuery>>,
}

impl RecordedExecutor {
    /// Creates an executor with no recorded responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads responses from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::operation("read_fixtures", format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    /// Parses responses from fixture JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the fixture format.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FixtureFile =
            serde_json::from_str(json).map_err(|e| Error::operation("parse_fixtures", e))?;
        Ok(Self {
            responses: file.responses,
            ..Self::default()
        })
    }

    /// Records rows for every invocation of a query.
    #[must_use]
    pub fn respond(mut self, query: &str, rows: Vec<Row>) -> Self {
        self.responses.push(RecordedResponse {
            query: query.to_string(),
            params: None,
            rows,
        });
        self
    }

    /// Records rows for a query invoked with exactly these parameters.
    ///
    /// Parameter-specific responses recorded earlier win over later ones.
    #[must_use]
    pub fn respond_with_params(mut self, query: &str, params: Properties, rows: Vec<Row>) -> Self {
        self.responses.push(RecordedResponse {
            query: query.to_string(),
            params: Some(params),
            rows,
        });
        self
    }

    /// Makes a query fail as if the database rejected it.
    #[must_use]
    pub fn fail(mut self, query: &str, cause: &str) -> Self {
        self.failures.insert(query.to_string(), cause.to_string());
        self
    }

    /// Returns the queries executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<CypherQuery> {
        self.executed.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn lookup(&self, query: &CypherQuery) -> Vec<Row> {
        self.responses
            .iter()
            .filter(|r| r.query == query.name)
            .find(|r| r.params.as_ref().is_none_or(|p| *p == query.params))
            .map(|r| r.rows.clone())
            .unwrap_or_default()
    }
}

impl GraphExecutor for RecordedExecutor {
    async fn run(&self, query: &CypherQuery) -> Result<Vec<Row>> {
        self.executed
            .lock()
            .map_err(|_| Error::OperationFailed {
                operation: query.name.to_string(),
                cause: "Lock poisoned".to_string(),
            })?
            .push(query.clone());

        if let Some(cause) = self.failures.get(query.name) {
            return Err(Error::operation(query.name, cause));
        }

        Ok(self.lookup(query))
    }
}
