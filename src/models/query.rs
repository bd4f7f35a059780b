//! Parameterized traversal descriptions handed to a graph executor.

use super::row::Properties;
use serde_json::Value;

/// One named, parameterized, read-only Cypher traversal.
///
/// User input never appears in `text`; it travels in `params` and is bound
/// by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    /// Catalog name, e.g. `movies.byId`.
    pub name: &'static str,
    /// Cypher text.
    pub text: String,
    /// Bound parameters.
    pub params: Properties,
    /// Columns the traversal returns, in order.
    pub columns: &'static [&'static str],
}

impl CypherQuery {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(
        name: &'static str,
        text: impl Into<String>,
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            text: text.into(),
            params: Properties::new(),
            columns,
        }
    }

    /// Binds a parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Returns a bound parameter.
    #[must_use]
    pub fn get_param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_binding() {
        let query = CypherQuery::new("movies.byId", "MATCH (movie:Movie {id: $movieId}) RETURN movie", &["movie"])
            .param("movieId", 603);
        assert_eq!(query.get_param("movieId"), Some(&json!(603)));
        assert!(!query.text.contains("603"));
        assert_eq!(query.columns, &["movie"]);
    }
}
