//! # Moviegraph
//!
//! Read-only REST API over a movie/actor graph.
//!
//! Moviegraph runs a fixed catalog of Cypher traversals (lookups by id, by
//! name, by relationship, and shortest "Bacon" paths) and shapes the result
//! rows into either typed records or a node-link structure suitable for
//! force-directed visualization.
//!
//! ## Layers
//!
//! - [`services::projector`] turns raw node property maps into [`Movie`] and [`Person`]
//! - [`services::catalog`] holds the parameterized traversals
//! - [`services::aggregator`] folds rows into detailed records or flat lists
//! - [`services::render`] flattens rows into `{nodes, links}`
//! - [`http`] maps HTTP routes onto the services (feature `http`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use moviegraph::{MovieService, OutputMode, PresentationOptions};
//! use moviegraph::storage::RecordedExecutor;
//! use std::path::Path;
//!
//! let executor = RecordedExecutor::from_file(Path::new("fixtures.json"))?;
//! let service = MovieService::new(&PresentationOptions::default());
//! let movie = service.by_id(&executor, 603, OutputMode::Default).await?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
#[cfg(feature = "http")]
pub mod http;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::{MoviegraphConfig, PresentationOptions};
pub use models::{
    GraphData, Movie, MovieDetails, OutputMode, Person, PersonDetails, Rendered, RgbColor, Row,
};
pub use services::{MovieService, PeopleService};
pub use storage::GraphExecutor;

/// Error type for moviegraph operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | HTTP |
/// |---------|-------------|------|
/// | `NotFound` | A single-entity lookup (or a list endpoint that treats emptiness as absence) matched zero rows | 404 |
/// | `InvalidInput` | A required id or name is missing, empty, or malformed | 400 |
/// | `OperationFailed` | The graph executor rejected a query, config or I/O failures | 500 |
/// | `FeatureNotEnabled` | A backend requiring a compile-time feature was requested | 500 |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Nothing matched a lookup.
    #[error("{0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The executor loses its connection or rejects a query
    /// - A fixture or config file cannot be read or parsed
    /// - The HTTP listener cannot bind
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Feature not enabled (requires feature flag).
    #[error("feature not enabled: {0} (compile with --features {0})")]
    FeatureNotEnabled(String),
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub fn operation(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }

    /// Returns the HTTP status code the dispatch layer answers with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
            Self::OperationFailed { .. } | Self::FeatureNotEnabled(_) => 500,
        }
    }
}

/// Result type alias for moviegraph operations.
pub type Result<T> = std::result::Result<T, Error>;
