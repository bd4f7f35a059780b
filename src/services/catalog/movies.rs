//! Movie traversals.

use super::contains_pattern;
use crate::models::CypherQuery;

/// Columns of a detailed movie row.
pub const DETAIL_COLUMNS: &[&str] = &[
    "movie",
    "keywords",
    "directors",
    "producers",
    "writers",
    "actors",
    "related",
    "genres",
];

/// Columns of a movie list row.
pub const LIST_COLUMNS: &[&str] = &["movie"];

/// Optional joins shared by the detailed lookups.
///
/// Every join is optional so a movie without cast, keywords, or crew still
/// yields its row. Related movies share at least one cast member and are
/// ordered by how many they share.
const DETAIL_EXPANSION: &str = "\
OPTIONAL MATCH (movie)<-[r:ACTS_IN]-(a:Person)
WITH movie, collect(DISTINCT {name: a.name, id: a.id, profileImageUrl: a.profileImageUrl, role: coalesce(r.role, r.name)}) AS actors
OPTIONAL MATCH (movie)<-[:ACTS_IN]-(:Person)-[:ACTS_IN]->(related:Movie)
WHERE related <> movie
WITH movie, actors, related, count(related) AS countRelated
ORDER BY countRelated DESC
WITH movie, actors, collect(DISTINCT related {.*}) AS related
OPTIONAL MATCH (movie)-[:HAS_KEYWORD]->(keyword:Keyword)
WITH movie, actors, related, collect(DISTINCT keyword {.*}) AS keywords
OPTIONAL MATCH (movie)-[:HAS_GENRE]->(genre:Genre)
WITH movie, actors, related, keywords, collect(DISTINCT genre {.*}) AS genres
OPTIONAL MATCH (movie)<-[:DIRECTED]-(d:Person)
WITH movie, actors, related, keywords, genres, collect(DISTINCT d {.*}) AS directors
OPTIONAL MATCH (movie)<-[:PRODUCED]-(p:Person)
WITH movie, actors, related, keywords, genres, directors, collect(DISTINCT p {.*}) AS producers
OPTIONAL MATCH (movie)<-[:WRITER_OF]-(w:Person)
RETURN DISTINCT movie {.*} AS movie,
       keywords,
       directors,
       producers,
       collect(DISTINCT w {.*}) AS writers,
       actors,
       related,
       genres";

/// Every movie.
#[must_use]
pub fn all() -> CypherQuery {
    CypherQuery::new(
        "movies.all",
        "MATCH (movie:Movie) RETURN movie {.*} AS movie",
        LIST_COLUMNS,
    )
}

/// One movie with its detail expansion.
#[must_use]
pub fn by_id(movie_id: i64) -> CypherQuery {
    CypherQuery::new(
        "movies.byId",
        format!("MATCH (movie:Movie {{id: $movieId}})\n{DETAIL_EXPANSION}"),
        DETAIL_COLUMNS,
    )
    .param("movieId", movie_id)
}

/// Movies whose title contains `title`, case-insensitively, with detail expansion.
#[must_use]
pub fn by_name(title: &str) -> CypherQuery {
    CypherQuery::new(
        "movies.byName",
        format!("MATCH (movie:Movie) WHERE movie.title =~ $pattern\n{DETAIL_EXPANSION}"),
        DETAIL_COLUMNS,
    )
    .param("pattern", contains_pattern(title))
}

/// Movies a person acted in.
#[must_use]
pub fn by_actor(person_id: i64) -> CypherQuery {
    CypherQuery::new(
        "movies.byActor",
        "MATCH (actor:Person {id: $personId})-[:ACTS_IN]->(movie:Movie)\nRETURN DISTINCT movie {.*} AS movie",
        LIST_COLUMNS,
    )
    .param("personId", person_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_by_id_binds_parameter() {
        let query = by_id(603);
        assert_eq!(query.name, "movies.byId");
        assert_eq!(query.get_param("movieId"), Some(&json!(603)));
        assert!(query.text.starts_with("MATCH (movie:Movie {id: $movieId})"));
        assert_eq!(query.columns, DETAIL_COLUMNS);
    }

    #[test]
    fn test_detail_joins_are_optional() {
        let query = by_id(1);
        for join in ["ACTS_IN", "HAS_KEYWORD", "HAS_GENRE", "DIRECTED", "PRODUCED", "WRITER_OF"] {
            assert!(
                query
                    .text
                    .lines()
                    .filter(|line| line.contains(join))
                    .all(|line| line.starts_with("OPTIONAL MATCH")),
                "{join} must be joined optionally"
            );
        }
        assert!(query.text.contains("related <> movie"));
        assert!(query.text.contains("ORDER BY countRelated DESC"));
    }

    #[test]
    fn test_by_name_never_interpolates_input() {
        let query = by_name("\") DETACH DELETE (n");
        assert!(!query.text.contains("DETACH"));
        assert_eq!(
            query.get_param("pattern"),
            Some(&json!(r#"(?i).*"\) DETACH DELETE \(n.*"#))
        );
    }

    #[test]
    fn test_every_detail_column_returned() {
        let text = by_id(1).text;
        let returned = text.split("RETURN").nth(1).unwrap_or_default();
        for column in DETAIL_COLUMNS {
            assert!(returned.contains(column), "missing column {column}");
        }
    }

    #[test]
    fn test_list_queries() {
        assert_eq!(all().columns, LIST_COLUMNS);
        assert!(all().params.is_empty());
        let query = by_actor(6384);
        assert_eq!(query.get_param("personId"), Some(&json!(6384)));
        assert!(query.text.contains("RETURN DISTINCT movie"));
    }
}
