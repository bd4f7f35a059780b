//! Raw query result rows.
//!
//! A [`Row`] maps the columns a traversal returns onto JSON values. Nodes
//! arrive as property maps (Cypher map projections such as `movie {.*}`);
//! driver-shaped nodes of the form `{"labels": [...], "properties": {...}}`
//! are accepted too and unwrapped by [`node_properties`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended property bag of a graph node.
pub type Properties = Map<String, Value>;

/// One result row of a traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    columns: Map<String, Value>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Sets a column in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Returns the raw value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Returns the node stored in a column, if it holds one.
    #[must_use]
    pub fn node(&self, column: &str) -> Option<&Properties> {
        self.columns.get(column).and_then(node_properties)
    }

    /// Returns the list stored in a column.
    ///
    /// Missing, null, and non-list columns read as empty.
    #[must_use]
    pub fn list(&self, column: &str) -> &[Value] {
        match self.columns.get(column) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(columns: Map<String, Value>) -> Self {
        Self { columns }
    }
}

/// Extracts the property map of a node value.
///
/// Returns `None` for null and non-object values.
#[must_use]
pub fn node_properties(value: &Value) -> Option<&Properties> {
    let map = value.as_object()?;
    match (map.get("labels"), map.get("properties")) {
        (Some(Value::Array(_)), Some(Value::Object(properties))) => Some(properties),
        _ => Some(map),
    }
}

/// Normalizes a driver integer into a native `i64`.
///
/// Accepts plain JSON numbers (integral floats included), numeric strings,
/// and the `{"low": .., "high": ..}` wrapper some drivers use for 64-bit
/// integers. Everything else yields `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn normalize_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) if map.len() == 2 => {
            let low = map.get("low").and_then(Value::as_i64)?;
            let high = map.get("high").and_then(Value::as_i64)?;
            let low = i64::from(i32::try_from(low).ok()? as u32);
            let high = i64::from(i32::try_from(high).ok()?);
            Some((high << 32) | low)
        },
        _ => None,
    }
}

/// Reads a string property, treating null and non-strings as absent.
#[must_use]
pub(crate) fn string_field(properties: &Properties, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Reads an integer property through [`normalize_integer`].
#[must_use]
pub(crate) fn integer_field(properties: &Properties, key: &str) -> Option<i64> {
    properties.get(key).and_then(normalize_integer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_plain_numbers() {
        assert_eq!(normalize_integer(&json!(142)), Some(142));
        assert_eq!(normalize_integer(&json!(142.0)), Some(142));
        assert_eq!(normalize_integer(&json!(142.5)), None);
        assert_eq!(normalize_integer(&json!(" 1999 ")), Some(1999));
        assert_eq!(normalize_integer(&json!(null)), None);
        assert_eq!(normalize_integer(&json!("n/a")), None);
    }

    #[test]
    fn test_normalize_rejects_out_of_range() {
        assert_eq!(normalize_integer(&json!(9_223_372_036_854_775_808_u64)), None);
        assert_eq!(normalize_integer(&json!(9.3e18)), None);
        assert_eq!(normalize_integer(&json!(-9.3e18)), None);
        assert_eq!(normalize_integer(&json!(i64::MAX)), Some(i64::MAX));
        assert_eq!(normalize_integer(&json!(-9_223_372_036_854_775_808.0)), Some(i64::MIN));
    }

    #[test]
    fn test_normalize_low_high_wrapper() {
        assert_eq!(normalize_integer(&json!({"low": 142, "high": 0})), Some(142));
        assert_eq!(
            normalize_integer(&json!({"low": 0, "high": 1})),
            Some(4_294_967_296)
        );
        assert_eq!(normalize_integer(&json!({"low": -1, "high": -1})), Some(-1));
        assert_eq!(normalize_integer(&json!({"low": 1})), None);
    }

    #[test]
    fn test_node_properties_unwraps_driver_shape() {
        let driver = json!({"labels": ["Movie"], "properties": {"id": 1}});
        assert_eq!(node_properties(&driver).and_then(|p| p.get("id")), Some(&json!(1)));

        let projected = json!({"id": 2, "title": "Heat"});
        assert_eq!(
            node_properties(&projected).and_then(|p| p.get("title")),
            Some(&json!("Heat"))
        );

        assert!(node_properties(&Value::Null).is_none());
    }

    #[test]
    fn test_row_list_defaults_to_empty() {
        let row = Row::new()
            .with("actors", json!([{"name": "Al Pacino"}]))
            .with("keywords", Value::Null);
        assert_eq!(row.list("actors").len(), 1);
        assert!(row.list("keywords").is_empty());
        assert!(row.list("missing").is_empty());
        assert_eq!(row.len(), 2);
    }
}
