//! Business logic services.
//!
//! Services run catalog queries through a [`GraphExecutor`] and shape the
//! rows into records or a rendered graph.

mod aggregator;
pub mod catalog;
mod movies;
mod people;
mod projector;
mod render;

pub use aggregator::Aggregator;
pub use movies::MovieService;
pub use people::PeopleService;
pub use projector::{project_movie, project_person};
pub use render::{ColorPicker, FixedColor, GraphRenderer, RandomColors, SeededColors};

use crate::config::PresentationOptions;
use crate::models::{CypherQuery, Row};
use crate::observability::current_request_id;
use crate::storage::GraphExecutor;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;

/// Runs one catalog query, recording its outcome and latency.
///
/// Query events carry the request id when one is in scope.
pub(crate) async fn execute<E: GraphExecutor>(executor: &E, query: &CypherQuery) -> Result<Vec<Row>> {
    let request_id = current_request_id();
    let start = Instant::now();
    let result = executor.run(query).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let outcome = match &result {
        Ok(rows) => {
            tracing::debug!(
                query = query.name,
                request_id = request_id.as_deref(),
                rows = rows.len(),
                duration_ms = elapsed_ms,
                "Query completed"
            );
            "success"
        },
        Err(e) => {
            tracing::warn!(
                query = query.name,
                request_id = request_id.as_deref(),
                error = %e,
                "Query failed"
            );
            "error"
        },
    };

    metrics::counter!(
        "moviegraph_queries_total",
        "query" => query.name,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("moviegraph_query_duration_ms", "query" => query.name).record(elapsed_ms);

    result
}

/// Fails with [`Error::NotFound`] when a query matched nothing.
pub(crate) fn require_rows(rows: Vec<Row>, what: &str) -> Result<Vec<Row>> {
    if rows.is_empty() {
        return Err(Error::NotFound(format!("{what} not found")));
    }
    Ok(rows)
}

/// Rejects empty or whitespace-only names before any query runs.
///
/// Accepted names are returned untouched and matched as given.
pub(crate) fn require_name<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}

/// Parses an entity id, rejecting blanks and non-integers.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `raw` is not an integer.
pub fn parse_id(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidInput("id is required".to_string()));
    }
    raw.parse()
        .map_err(|_| Error::InvalidInput(format!("id must be an integer, got '{raw}'")))
}

/// Builds the color source for a set of presentation options.
///
/// A configured seed makes rendered colors reproducible.
#[must_use]
pub fn color_picker(options: &PresentationOptions) -> Arc<dyn ColorPicker> {
    match options.color_seed {
        Some(seed) => Arc::new(SeededColors::new(seed)),
        None => Arc::new(RandomColors),
    }
}
