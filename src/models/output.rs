//! Output modes and rendered responses.

use super::graph::GraphData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a query result is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Flat entity records.
    #[default]
    Default,
    /// Node-link graph for d3 force layouts.
    D3,
}

impl OutputMode {
    /// Returns the mode as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::D3 => "d3",
        }
    }

    /// Parses an `output` request parameter.
    ///
    /// Anything other than `d3` selects [`OutputMode::Default`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("d3") {
            Self::D3
        } else {
            Self::Default
        }
    }

    /// Parses an optional parameter, defaulting when absent.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        param.map_or(Self::Default, Self::parse)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A query result in the requested output mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rendered<T> {
    /// Graph output.
    Graph(GraphData),
    /// Record output.
    Records(T),
}

impl<T> Rendered<T> {
    /// Returns the records, if this is record output.
    #[must_use]
    pub fn records(self) -> Option<T> {
        match self {
            Self::Records(records) => Some(records),
            Self::Graph(_) => None,
        }
    }

    /// Returns the graph, if this is graph output.
    #[must_use]
    pub fn graph(self) -> Option<GraphData> {
        match self {
            Self::Graph(graph) => Some(graph),
            Self::Records(_) => None,
        }
    }
}
