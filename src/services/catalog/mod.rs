//! Query catalog: the fixed library of read-only traversals.
//!
//! | Query | Input | Returns | Zero rows |
//! |-------|-------|---------|-----------|
//! | `movies.all` | - | every `Movie` | empty list |
//! | `movies.byId` | movie id | movie + detail expansion | not found |
//! | `movies.byName` | title substring | movie + detail expansion, first match | not found |
//! | `movies.byActor` | person id | movies the person acted in | empty list |
//! | `people.all` | - | every `Person` | empty list |
//! | `people.byId` | person id | person + detail expansion | not found |
//! | `people.byName` | exact name | person + detail expansion | not found |
//! | `people.search` | name substring | matching people | not found |
//! | `people.byMovie` | movie id | people who acted in the movie | not found |
//! | `people.bacon` | two names | people on the shortest `ACTS_IN` path | not found |
//!
//! Name inputs are matched case-insensitively with Cypher's `=~`. The
//! pattern is built here with every regex metacharacter escaped and bound as
//! a parameter, so user text is always matched literally.

pub mod movies;
pub mod people;

/// Builds a case-insensitive pattern matching `text` anywhere in a value.
#[must_use]
pub fn contains_pattern(text: &str) -> String {
    format!("(?i).*{}.*", regex::escape(text))
}

/// Builds a case-insensitive pattern matching exactly `text`.
#[must_use]
pub fn exact_pattern(text: &str) -> String {
    format!("(?i){}", regex::escape(text))
}
