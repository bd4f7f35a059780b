//! Entity projection from raw node property maps.
//!
//! Projection copies every property of the node onto the record. Numeric
//! properties with a dedicated field (`id`, `released`, `duration`, `runtime`,
//! `born`, `my_rating`) are normalized to `i64`, whatever integer wrapper the
//! driver used. A known property whose value cannot be converted stays in
//! `extra` under its original key, so nothing the node carried is lost.
//!
//! Projection is pure and infallible, and idempotent: projecting the
//! serialized properties of a projected record yields the same record.

use crate::models::{Movie, Person, Properties, normalize_integer};
use serde_json::Value;

/// Projects a movie node.
///
/// `my_rating` is attached only when supplied; `Some(0)` is kept. When it is
/// `None`, a `my_rating` property already on the node is carried over.
#[must_use]
pub fn project_movie(properties: &Properties, my_rating: Option<i64>) -> Movie {
    let mut extra = properties.clone();
    let stored_rating = take_integer(&mut extra, "my_rating");

    Movie {
        id: take_integer(&mut extra, "id"),
        title: take_string(&mut extra, "title"),
        summary: take_string(&mut extra, "summary"),
        released: take_integer(&mut extra, "released"),
        duration: take_integer(&mut extra, "duration"),
        runtime: take_integer(&mut extra, "runtime"),
        rated: take_string(&mut extra, "rated"),
        tagline: take_string(&mut extra, "tagline"),
        poster_image: take_string(&mut extra, "poster_image"),
        my_rating: my_rating.or(stored_rating),
        extra,
    }
}

/// Projects a person node.
#[must_use]
pub fn project_person(properties: &Properties) -> Person {
    let mut extra = properties.clone();

    Person {
        id: take_integer(&mut extra, "id"),
        name: take_string(&mut extra, "name"),
        born: take_integer(&mut extra, "born"),
        profile_image_url: take_string(&mut extra, "profileImageUrl"),
        extra,
    }
}

/// Moves an integer property out of the bag.
fn take_integer(extra: &mut Properties, key: &str) -> Option<i64> {
    let value = extra.remove(key)?;
    if value.is_null() {
        return None;
    }
    let normalized = normalize_integer(&value);
    if normalized.is_none() {
        extra.insert(key.to_string(), value);
    }
    normalized
}

/// Moves a string property out of the bag.
fn take_string(extra: &mut Properties, key: &str) -> Option<String> {
    match extra.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            extra.insert(key.to_string(), other);
            None
        },
    }
}
