//! Storage layer.
//!
//! The graph database itself is external. This layer only defines how the
//! services reach it: the [`GraphExecutor`] trait and its backends.

pub mod executor;
pub mod traits;

#[cfg(feature = "neo4j")]
pub use executor::Neo4jExecutor;
pub use executor::{RecordedExecutor, RecordedResponse};
pub use traits::GraphExecutor;
