//! Movie records.

use super::person::{CastMember, Person};
use super::row::Properties;
use serde::{Deserialize, Serialize};

/// A movie node projected into a typed record.
///
/// Properties without a dedicated field (and known properties whose values
/// could not be converted) are kept in `extra`, so serializing a `Movie`
/// emits every property the node carried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Plot summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<i64>,
    /// Duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Runtime in minutes, normalized from the driver integer type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i64>,
    /// Rating classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    /// Tagline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Poster image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<String>,
    /// The caller's own rating; absent unless explicitly supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_rating: Option<i64>,
    /// Remaining node properties.
    #[serde(flatten)]
    pub extra: Properties,
}

/// A keyword or genre node attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining node properties.
    #[serde(flatten)]
    pub extra: Properties,
}

impl Tag {
    /// Builds a tag from a node property map.
    #[must_use]
    pub fn from_properties(properties: &Properties) -> Self {
        let mut extra = properties.clone();
        let name = match extra.remove("name") {
            Some(serde_json::Value::String(name)) => Some(name),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => {
                extra.insert("name".to_string(), other);
                None
            },
        };
        Self { name, extra }
    }
}

/// A movie with its detail collections attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// The movie itself.
    #[serde(flatten)]
    pub movie: Movie,
    /// Cast, with roles.
    #[serde(default)]
    pub actors: Vec<CastMember>,
    /// Movies sharing a cast member, most connected first.
    #[serde(default)]
    pub related: Vec<Movie>,
    /// Keywords.
    #[serde(default)]
    pub keywords: Vec<Tag>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Tag>,
    /// Directors.
    #[serde(default)]
    pub directors: Vec<Person>,
    /// Producers.
    #[serde(default)]
    pub producers: Vec<Person>,
    /// Writers.
    #[serde(default)]
    pub writers: Vec<Person>,
}
