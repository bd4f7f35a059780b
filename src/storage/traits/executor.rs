//! Graph executor trait.
//!
//! An executor runs one traversal against the graph database and returns its
//! rows. The dispatch layer acquires an executor (a session) per request and
//! hands it to the services; the services never open or close sessions.
//!
//! # Available Implementations
//!
//! | Executor | Use Case |
//! |----------|----------|
//! | `Neo4jExecutor` | Production; Bolt protocol via `neo4rs` (feature `neo4j`) |
//! | `RecordedExecutor` | Testing and offline runs; replays canned rows |
//!
//! # Error Modes
//!
//! Connection loss and query errors surface as [`crate::Error::OperationFailed`].
//! Executors do not retry; retries and timeouts belong to the connection layer.

use crate::Result;
use crate::models::{CypherQuery, Row};
use std::future::Future;
use std::sync::Arc;

/// Runs traversals and returns result rows.
///
/// # Implementor Notes
///
/// - Methods use `&self` so one executor can serve concurrent requests
/// - Bind `query.params` as driver parameters; never splice them into `query.text`
/// - Return rows in traversal order, with every column in `query.columns`
pub trait GraphExecutor: Send + Sync {
    /// Runs one traversal to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the database rejects the query or the connection fails.
    fn run(&self, query: &CypherQuery) -> impl Future<Output = Result<Vec<Row>>> + Send;
}

impl<E: GraphExecutor> GraphExecutor for Arc<E> {
    fn run(&self, query: &CypherQuery) -> impl Future<Output = Result<Vec<Row>>> + Send {
        self.as_ref().run(query)
    }
}

impl<E: GraphExecutor> GraphExecutor for &E {
    fn run(&self, query: &CypherQuery) -> impl Future<Output = Result<Vec<Row>>> + Send {
        (**self).run(query)
    }
}
