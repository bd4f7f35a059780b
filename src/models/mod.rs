//! Data models for moviegraph.
//!
//! This module contains the typed records the query layer produces.
//!
//! - [`Row`]: a raw result row (column name to JSON value)
//! - [`Movie`], [`Person`]: projected entity records
//! - [`MovieDetails`], [`PersonDetails`]: records with detail collections
//! - [`GraphData`]: node-link output for visualization
//! - [`OutputMode`], [`Rendered`]: output selection

pub mod graph;
mod movie;
mod output;
mod person;
mod query;
mod row;

pub use graph::{GraphData, GraphLink, GraphNode, NodeLabel, RgbColor, SymbolType};
pub use movie::{Movie, MovieDetails, Tag};
pub use output::{OutputMode, Rendered};
pub use person::{ActingCredit, CastMember, MovieCredit, Person, PersonDetails, Placeholder};
pub use query::CypherQuery;
pub use row::{Properties, Row, node_properties, normalize_integer};
