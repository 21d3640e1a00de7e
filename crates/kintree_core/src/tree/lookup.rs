//! Relative lookup for the member detail view.
//!
//! Name resolution is best-effort: ids that do not resolve to a record are
//! dropped rather than shown as placeholders.

use super::index::FamilyIndex;
use super::resolver::compare_names;
use crate::dates::{age, format_long, parse_date_as_of};
use crate::model::person::PersonId;
use chrono::NaiveDate;
use serde::Serialize;

/// Names of a member's relatives, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Relatives {
    /// Parent names in link order.
    pub parents: Vec<String>,
    /// Child names, alphabetical.
    pub children: Vec<String>,
    /// Spouse names in link order.
    pub spouses: Vec<String>,
    /// People sharing at least one known parent, alphabetical.
    pub siblings: Vec<String>,
    pub grandparents: Vec<String>,
    pub great_grandparents: Vec<String>,
}

/// Detail view model for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDetail {
    pub id: PersonId,
    pub name: String,
    pub relationship: String,
    /// Long-form birthday, or `Not set`.
    pub birthday: String,
    /// Long-form passing date; `None` unless it parses.
    pub passed_away: Option<String>,
    pub age: Option<u32>,
    /// Card label for a known gender code.
    pub gender: Option<String>,
    pub location: Option<String>,
    pub relatives: Relatives,
}

impl FamilyIndex<'_> {
    /// Relatives of the member with `id`, or `None` when the id is unknown.
    pub fn relatives(&self, id: &str) -> Option<Relatives> {
        let slot = self.slot_of(id)?;

        let parents = self.parents(slot).to_vec();
        let grandparents = self.parents_of_all(&parents);
        let great_grandparents = self.parents_of_all(&grandparents);

        let mut siblings = Vec::new();
        for &parent in &parents {
            for &sibling in self.children(parent) {
                if sibling != slot && !siblings.contains(&sibling) {
                    siblings.push(sibling);
                }
            }
        }

        Some(Relatives {
            parents: self.names(&parents),
            children: self.sorted_names(self.children(slot)),
            spouses: self.names(self.spouses(slot)),
            siblings: self.sorted_names(&siblings),
            grandparents: self.names(&grandparents),
            great_grandparents: self.names(&great_grandparents),
        })
    }

    /// Detail view for the member with `id`, dates rendered as of `today`.
    pub fn member_detail(&self, id: &str, today: NaiveDate) -> Option<MemberDetail> {
        let person = self.person(self.slot_of(id)?);
        let relatives = self.relatives(id)?;
        Some(MemberDetail {
            id: person.id.clone(),
            name: person.display_name().to_string(),
            relationship: person.relationship_display().to_string(),
            birthday: format_long(person.birth_date.as_ref(), today),
            passed_away: person
                .passed_away_date
                .as_ref()
                .filter(|raw| parse_date_as_of(raw, today).is_some())
                .map(|raw| format_long(Some(raw), today)),
            age: person.birth_date.as_ref().and_then(|raw| age(raw, today)),
            gender: person.gender_label().map(str::to_string),
            location: person.location_label().map(str::to_string),
            relatives,
        })
    }

    fn names(&self, slots: &[usize]) -> Vec<String> {
        slots
            .iter()
            .map(|slot| self.person(*slot).display_name().to_string())
            .collect()
    }

    fn sorted_names(&self, slots: &[usize]) -> Vec<String> {
        let mut names = self.names(slots);
        names.sort_by(|left, right| compare_names(left, right));
        names
    }
}
