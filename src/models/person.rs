//! Person records and the relation entries attached to detailed lookups.

use super::row::{Properties, integer_field, string_field};
use serde::{Deserialize, Serialize};

/// A person node projected into a typed record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable external identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Birth year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<i64>,
    /// Portrait URL.
    #[serde(
        default,
        rename = "profileImageUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_image_url: Option<String>,
    /// Remaining node properties.
    #[serde(flatten)]
    pub extra: Properties,
}

/// Relation entries that an optional match can fill with nulls only.
///
/// A collected `{name: a.name, id: a.id, ...}` map stays in the collection
/// even when the optional match found nothing; such entries are placeholders.
pub trait Placeholder {
    /// Returns `true` when every field of the entry is absent.
    fn is_placeholder(&self) -> bool;
}

/// A person credited on a movie: cast member of a movie, or co-actor of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Person id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Portrait URL.
    #[serde(default, rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
    /// Character played.
    #[serde(default)]
    pub role: Option<String>,
}

impl CastMember {
    /// Builds an entry from a collected map.
    #[must_use]
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            name: string_field(properties, "name"),
            id: integer_field(properties, "id"),
            profile_image_url: string_field(properties, "profileImageUrl"),
            role: string_field(properties, "role"),
        }
    }
}

impl Placeholder for CastMember {
    fn is_placeholder(&self) -> bool {
        self.name.is_none()
            && self.id.is_none()
            && self.profile_image_url.is_none()
            && self.role.is_none()
    }
}

/// A movie a person directed, produced, or wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCredit {
    /// Movie title.
    #[serde(default)]
    pub name: Option<String>,
    /// Movie id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Poster URL.
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl MovieCredit {
    /// Builds an entry from a collected map.
    #[must_use]
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            name: string_field(properties, "name"),
            id: integer_field(properties, "id"),
            image_url: string_field(properties, "imageUrl"),
        }
    }
}

impl Placeholder for MovieCredit {
    fn is_placeholder(&self) -> bool {
        self.name.is_none() && self.id.is_none() && self.image_url.is_none()
    }
}

/// A movie a person acted in, with the role played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingCredit {
    /// Movie title.
    #[serde(default)]
    pub name: Option<String>,
    /// Movie id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Poster URL.
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    /// Character played.
    #[serde(default)]
    pub role: Option<String>,
}

impl ActingCredit {
    /// Builds an entry from a collected map.
    #[must_use]
    pub fn from_properties(properties: &Properties) -> Self {
        Self {
            name: string_field(properties, "name"),
            id: integer_field(properties, "id"),
            image_url: string_field(properties, "imageUrl"),
            role: string_field(properties, "role"),
        }
    }
}

impl Placeholder for ActingCredit {
    fn is_placeholder(&self) -> bool {
        self.name.is_none() && self.id.is_none() && self.image_url.is_none() && self.role.is_none()
    }
}

/// A person with detail collections attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    /// The person itself.
    #[serde(flatten)]
    pub person: Person,
    /// Movies directed.
    #[serde(default)]
    pub directed: Vec<MovieCredit>,
    /// Movies produced.
    #[serde(default)]
    pub produced: Vec<MovieCredit>,
    /// Movies written.
    #[serde(default)]
    pub wrote: Vec<MovieCredit>,
    /// Movies acted in.
    #[serde(default, rename = "actedIn")]
    pub acted_in: Vec<ActingCredit>,
    /// Co-actors through shared movies, with the role they played.
    #[serde(default)]
    pub related: Vec<CastMember>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cast_member_reads_wide_ids() {
        let properties = json!({
            "name": "Keanu Reeves",
            "id": {"low": 6384, "high": 0},
            "profileImageUrl": "http://img/keanu.jpg",
            "role": "Neo"
        });
        let member = CastMember::from_properties(properties.as_object().unwrap());
        assert_eq!(member.id, Some(6384));
        assert_eq!(member.role.as_deref(), Some("Neo"));
        assert!(!member.is_placeholder());
    }

    #[test]
    fn test_all_null_entries_are_placeholders() {
        let properties = json!({"name": null, "id": null, "imageUrl": null, "role": null});
        let map = properties.as_object().unwrap();
        assert!(ActingCredit::from_properties(map).is_placeholder());
        assert!(MovieCredit::from_properties(map).is_placeholder());
        assert!(CastMember::from_properties(map).is_placeholder());
    }

    #[test]
    fn test_person_details_field_names() {
        let details = PersonDetails {
            person: Person {
                id: Some(1),
                name: Some("Carrie-Anne Moss".to_string()),
                profile_image_url: Some("http://img/carrie.jpg".to_string()),
                ..Person::default()
            },
            acted_in: vec![ActingCredit {
                name: Some("The Matrix".to_string()),
                id: Some(603),
                image_url: None,
                role: Some("Trinity".to_string()),
            }],
            ..PersonDetails::default()
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value.get("profileImageUrl"), Some(&json!("http://img/carrie.jpg")));
        assert_eq!(
            value.get("actedIn"),
            Some(&json!([{"name": "The Matrix", "id": 603, "imageUrl": null, "role": "Trinity"}]))
        );
        assert_eq!(value.get("directed"), Some(&json!([])));
    }
}
