//! Neo4j executor over the Bolt protocol.
//!
//! Wraps a pooled [`neo4rs::Graph`]. Each call to [`GraphExecutor::run`]
//! borrows a connection from the pool for the duration of one traversal,
//! which gives the per-request session semantics the services expect.

use crate::config::Neo4jConfig;
use crate::models::{CypherQuery, Row};
use crate::storage::traits::GraphExecutor;
use crate::{Error, Result};
use neo4rs::{ConfigBuilder, Graph, Query, query};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;

/// Executor backed by a Neo4j server.
#[derive(Clone)]
pub struct Neo4jExecutor {
    graph: Arc<Graph>,
}

impl std::fmt::Debug for Neo4jExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jExecutor").finish_non_exhaustive()
    }
}

impl Neo4jExecutor {
    /// Connects to the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be established.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self> {
        tracing::info!(uri = %config.uri, user = %config.user, "Connecting to Neo4j");
        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.expose_secret());
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }
        let bolt_config = builder
            .build()
            .map_err(|e| Error::operation("neo4j_config", e))?;
        let graph = Graph::connect(bolt_config)
            .await
            .map_err(|e| Error::operation("neo4j_connect", e))?;

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    fn bind(cypher: &CypherQuery) -> Result<Query> {
        let mut bolt = query(&cypher.text);
        for (key, value) in &cypher.params {
            bolt = match value {
                Value::String(s) => bolt.param(key, s.as_str()),
                Value::Bool(b) => bolt.param(key, *b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => bolt.param(key, i),
                    None => bolt.param(key, n.as_f64().unwrap_or_default()),
                },
                other => {
                    return Err(Error::InvalidInput(format!(
                        "unsupported parameter type for '{key}': {other}"
                    )));
                },
            };
        }
        Ok(bolt)
    }
}

impl GraphExecutor for Neo4jExecutor {
    async fn run(&self, cypher: &CypherQuery) -> Result<Vec<Row>> {
        let bolt = Self::bind(cypher)?;
        let mut stream = self
            .graph
            .execute(bolt)
            .await
            .map_err(|e| Error::operation(cypher.name, e))?;

        let mut rows = Vec::new();
        while let Some(record) = stream
            .next()
            .await
            .map_err(|e| Error::operation(cypher.name, e))?
        {
            let mut row = Row::new();
            for column in cypher.columns {
                let value: Value = record
                    .get(column)
                    .map_err(|e| Error::operation(cypher.name, format!("column '{column}': {e}")))?;
                row.insert(*column, value);
            }
            rows.push(row);
        }

        Ok(rows)
    }
}
