//! Person traversals.

use super::{contains_pattern, exact_pattern};
use crate::models::CypherQuery;

/// Columns of a detailed person row.
pub const DETAIL_COLUMNS: &[&str] = &["person", "directed", "produced", "wrote", "actedIn", "related"];

/// Columns of a person list row.
pub const LIST_COLUMNS: &[&str] = &["person"];

/// Optional joins shared by the detailed lookups.
const DETAIL_EXPANSION: &str = "\
OPTIONAL MATCH (person)-[:DIRECTED]->(d:Movie)
WITH person, collect(DISTINCT {name: d.title, id: d.id, imageUrl: d.imageUrl}) AS directed
OPTIONAL MATCH (person)-[:PRODUCED]->(p:Movie)
WITH person, directed, collect(DISTINCT {name: p.title, id: p.id, imageUrl: p.imageUrl}) AS produced
OPTIONAL MATCH (person)-[:WRITER_OF]->(w:Movie)
WITH person, directed, produced, collect(DISTINCT {name: w.title, id: w.id, imageUrl: w.imageUrl}) AS wrote
OPTIONAL MATCH (person)-[r:ACTS_IN]-(a:Movie)
WITH person, directed, produced, wrote, collect(DISTINCT {name: a.title, id: a.id, imageUrl: a.imageUrl, role: coalesce(r.role, r.name)}) AS actedIn
OPTIONAL MATCH (person)-[:ACTS_IN]->(:Movie)<-[relatedRole:ACTS_IN]-(relatedPerson:Person)
WHERE relatedPerson <> person
RETURN DISTINCT person {.*} AS person,
       directed,
       produced,
       wrote,
       actedIn,
       collect(DISTINCT {name: relatedPerson.name, id: relatedPerson.id, profileImageUrl: relatedPerson.profileImageUrl, role: coalesce(relatedRole.role, relatedRole.name)}) AS related";

/// Every person.
#[must_use]
pub fn all() -> CypherQuery {
    CypherQuery::new(
        "people.all",
        "MATCH (person:Person) RETURN person {.*} AS person",
        LIST_COLUMNS,
    )
}

/// One person with detail expansion.
#[must_use]
pub fn by_id(person_id: i64) -> CypherQuery {
    CypherQuery::new(
        "people.byId",
        format!("MATCH (person:Person {{id: $personId}})\n{DETAIL_EXPANSION}"),
        DETAIL_COLUMNS,
    )
    .param("personId", person_id)
}

/// People named exactly `name`, case-insensitively, with detail expansion.
#[must_use]
pub fn by_name(name: &str) -> CypherQuery {
    CypherQuery::new(
        "people.byName",
        format!("MATCH (person:Person) WHERE person.name =~ $pattern\n{DETAIL_EXPANSION}"),
        DETAIL_COLUMNS,
    )
    .param("pattern", exact_pattern(name))
}

/// People whose name contains `text`, case-insensitively.
#[must_use]
pub fn search(text: &str) -> CypherQuery {
    CypherQuery::new(
        "people.search",
        "MATCH (person:Person) WHERE person.name =~ $pattern\nRETURN DISTINCT person {.*} AS person",
        LIST_COLUMNS,
    )
    .param("pattern", contains_pattern(text))
}

/// People who acted in a movie.
#[must_use]
pub fn by_movie(movie_id: i64) -> CypherQuery {
    CypherQuery::new(
        "people.byMovie",
        "MATCH (person:Person)-[:ACTS_IN]->(movie:Movie {id: $movieId})\nRETURN DISTINCT person {.*} AS person",
        LIST_COLUMNS,
    )
    .param("movieId", movie_id)
}

/// People along the shortest `ACTS_IN` path between two named people.
///
/// Path nodes without a non-empty `name` (the movies in between) are dropped.
#[must_use]
pub fn bacon(name1: &str, name2: &str) -> CypherQuery {
    CypherQuery::new(
        "people.bacon",
        "\
MATCH p = shortestPath((p1:Person {name: $name1})-[:ACTS_IN*]-(target:Person {name: $name2}))
UNWIND [n IN nodes(p) WHERE n.name IS NOT NULL AND size(n.name) > 0] AS person
RETURN DISTINCT person {.*} AS person",
        LIST_COLUMNS,
    )
    .param("name1", name1)
    .param("name2", name2)
}

/// The degenerate path from a person to themselves.
#[must_use]
pub fn bacon_self(name: &str) -> CypherQuery {
    CypherQuery::new(
        "people.baconSelf",
        "MATCH (person:Person {name: $name})\nRETURN DISTINCT person {.*} AS person",
        LIST_COLUMNS,
    )
    .param("name", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_by_id_binds_parameter() {
        let query = by_id(6384);
        assert_eq!(query.name, "people.byId");
        assert_eq!(query.get_param("personId"), Some(&json!(6384)));
        assert_eq!(query.columns, DETAIL_COLUMNS);
    }

    #[test]
    fn test_by_name_is_exact_and_search_is_substring() {
        assert_eq!(
            by_name("Keanu Reeves").get_param("pattern"),
            Some(&json!("(?i)Keanu Reeves"))
        );
        assert_eq!(search("keanu").get_param("pattern"), Some(&json!("(?i).*keanu.*")));
        assert_eq!(search("keanu").columns, LIST_COLUMNS);
    }

    #[test]
    fn test_bacon_binds_both_names() {
        let query = bacon("Kevin Bacon", "Tom Hanks");
        assert_eq!(query.get_param("name1"), Some(&json!("Kevin Bacon")));
        assert_eq!(query.get_param("name2"), Some(&json!("Tom Hanks")));
        assert!(query.text.contains("shortestPath"));
        assert!(query.text.contains("[:ACTS_IN*]"));
        assert!(!query.text.contains("Kevin"));
    }

    #[test]
    fn test_related_excludes_self() {
        assert!(by_id(1).text.contains("relatedPerson <> person"));
    }

    #[test]
    fn test_detail_returns_every_column() {
        let text = by_id(1).text;
        let returned = text.split("RETURN").nth(1).unwrap_or_default();
        for column in DETAIL_COLUMNS {
            assert!(returned.contains(column), "missing column {column}");
        }
    }

    #[test]
    fn test_by_movie() {
        let query = by_movie(603);
        assert_eq!(query.get_param("movieId"), Some(&json!(603)));
        assert_eq!(bacon_self("Kevin Bacon").get_param("name"), Some(&json!("Kevin Bacon")));
    }
}
