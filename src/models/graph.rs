// Allow non-const functions that read from serde_json maps
#![allow(clippy::missing_const_for_fn)]

//! Node-link structures for force-directed visualization.
//!
//! The serialized shape is consumed by existing visualization clients:
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "name": "Keanu Reeves", "label": "person", "symbolType": "star", "color": "rgb(12, 200, 7)"}],
//!   "links": [{"source": 603, "target": 1}]
//! }
//! ```
//!
//! Every node emitted by one render call carries the same [`RgbColor`].

use super::row::Properties;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Entity kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLabel {
    /// A movie.
    Movie,
    /// A person.
    Person,
}

impl NodeLabel {
    /// Returns the label as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Person => "person",
        }
    }

    /// Returns the marker shape used for this kind.
    #[must_use]
    pub const fn symbol(&self) -> SymbolType {
        match self {
            Self::Movie => SymbolType::Circle,
            Self::Person => SymbolType::Star,
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Marker shape of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    /// Movies.
    Circle,
    /// People.
    Star,
}

/// A color in `rgb(r, g, b)` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl RgbColor {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `rgb(r, g, b)` notation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
        let r = channels.next()?.ok()?;
        let g = channels.next()?.ok()?;
        let b = channels.next()?.ok()?;
        if channels.next().is_some() {
            return None;
        }
        Some(Self { r, g, b })
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

/// A node in the rendered graph: entity properties plus presentation tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Entity properties, stripped of volatile fields.
    #[serde(flatten)]
    pub properties: Properties,
    /// Entity kind.
    pub label: NodeLabel,
    /// Marker shape.
    #[serde(rename = "symbolType")]
    pub symbol_type: SymbolType,
    /// Render color, shared by all nodes of one render call.
    pub color: RgbColor,
}

impl GraphNode {
    /// Returns the raw entity id of this node.
    #[must_use]
    pub fn id(&self) -> &Value {
        self.properties.get("id").unwrap_or(&Value::Null)
    }
}

/// An edge between two entity ids.
///
/// `source` is the related entity, `target` the primary one. Direction only
/// matters to the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Related entity id.
    pub source: Value,
    /// Primary entity id.
    pub target: Value,
}

/// Rendered node-link graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Nodes, in emission order.
    pub nodes: Vec<GraphNode>,
    /// Links, in emission order.
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
