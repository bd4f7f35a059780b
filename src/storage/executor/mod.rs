//! Graph executor backends.
//!
//! | Backend | Use Case | Feature |
//! |---------|----------|---------|
//! | [`RecordedExecutor`] | Testing, offline fixtures | always |
//! | `Neo4jExecutor` | Production | `neo4j` |

#[cfg(feature = "neo4j")]
mod neo4j;
mod recorded;

#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jExecutor;
pub use recorded::{RecordedExecutor, RecordedResponse};
