//! Person record as supplied by the persistence collaborator.
//!
//! # Responsibility
//! - Mirror the member document shape (`parentIds`, `spouseIds`, `photoURL`, ...).
//! - Tolerate missing, `null` or off-type fields instead of rejecting the record.
//!
//! # Invariants
//! - `parent_ids` and `spouse_ids` never contain blank ids after decoding.
//! - `relationship` keeps the original label text, recognized or not.

use crate::dates::DateSource;
use crate::relation::{Relation, SELF_MARKERS};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable identifier assigned by the persistence layer.
pub type PersonId = String;

/// Label shown when a person has no relationship text.
pub const DEFAULT_RELATIONSHIP_LABEL: &str = "Family Member";
/// Name shown when a person has no display name.
pub const UNNAMED_MEMBER: &str = "Unnamed member";

const GENDER_LABELS: &[(&str, &str)] = &[
    ("female", "Female"),
    ("male", "Male"),
    ("non-binary", "Non-binary"),
    ("unspecified", "Prefer not to say"),
];

/// One family member snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    /// Display name; may be empty.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Free-text relationship label from an open vocabulary.
    #[serde(default, deserialize_with = "lenient_text")]
    pub relationship: String,
    #[serde(default)]
    pub birth_date: Option<DateSource>,
    #[serde(default)]
    pub passed_away_date: Option<DateSource>,
    /// Ordered parent links. Usually 0-2 entries, but more are tolerated.
    #[serde(default, deserialize_with = "id_list")]
    pub parent_ids: Vec<PersonId>,
    /// Spouse links. Symmetric by convention only.
    #[serde(default, deserialize_with = "id_list")]
    pub spouse_ids: Vec<PersonId>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    #[serde(
        default,
        rename = "photoURL",
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
    /// Creation timestamp; only used to order recently added members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateSource>,
}

impl Person {
    /// Creates a person with only identity and name set.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }

    pub fn with_parents<I, S>(mut self, parent_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        self.parent_ids = parent_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spouses<I, S>(mut self, spouse_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        self.spouse_ids = spouse_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_birth_date(mut self, birth_date: DateSource) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Classifies the free-text relationship label.
    pub fn relation(&self) -> Relation {
        Relation::from_label(&self.relationship)
    }

    /// Returns whether this record marks the viewing user.
    ///
    /// Exact match against `SELF_MARKERS`; case and spacing variants that
    /// `relation()` accepts do not count.
    pub fn is_self_marker(&self) -> bool {
        SELF_MARKERS.contains(&self.relationship.as_str())
    }

    /// Name for display, falling back to a placeholder when blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_MEMBER
        } else {
            self.name.as_str()
        }
    }

    /// Relationship label for display, falling back when blank.
    pub fn relationship_display(&self) -> &str {
        if self.relationship.trim().is_empty() {
            DEFAULT_RELATIONSHIP_LABEL
        } else {
            self.relationship.as_str()
        }
    }

    /// Display label for a known gender code; unknown codes have none.
    pub fn gender_label(&self) -> Option<&'static str> {
        let code = self.gender.as_deref()?;
        GENDER_LABELS
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }

    /// Trimmed location, or `None` when blank.
    pub fn location_label(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

// Off-type values decode as absent; one malformed field never fails a snapshot.

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_text(deserializer)?.unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn id_list<'de, D>(deserializer: D) -> Result<Vec<PersonId>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(id) => Some(id.trim().to_string()),
            _ => None,
        })
        .filter(|id| !id.is_empty())
        .collect())
}
