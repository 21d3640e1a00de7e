//! Slot-indexed adjacency over one member snapshot.

use crate::model::person::{Person, PersonId};
use std::collections::HashMap;

/// Arena view of a snapshot: slot `i` is `people[i]`, and every link list
/// holds slots rather than ids.
///
/// # Invariants
/// - Link lists only contain slots of people present in the snapshot.
/// - A person never links to their own slot.
/// - Link lists keep source order and contain no duplicates.
/// - When ids repeat, links resolve to the first record carrying the id.
#[derive(Debug)]
pub struct FamilyIndex<'a> {
    people: &'a [Person],
    slots: HashMap<&'a str, usize>,
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    spouses: Vec<Vec<usize>>,
}

impl<'a> FamilyIndex<'a> {
    /// Builds the index in one pass over the snapshot.
    pub fn build(people: &'a [Person]) -> Self {
        let mut slots = HashMap::with_capacity(people.len());
        for (slot, person) in people.iter().enumerate() {
            slots.entry(person.id.as_str()).or_insert(slot);
        }

        let parents = people
            .iter()
            .enumerate()
            .map(|(slot, person)| resolve_links(&slots, slot, &person.parent_ids))
            .collect::<Vec<_>>();
        let spouses = people
            .iter()
            .enumerate()
            .map(|(slot, person)| resolve_links(&slots, slot, &person.spouse_ids))
            .collect::<Vec<_>>();

        let mut children = vec![Vec::new(); people.len()];
        for (child, parent_slots) in parents.iter().enumerate() {
            for &parent in parent_slots {
                children[parent].push(child);
            }
        }

        Self {
            people,
            slots,
            parents,
            children,
            spouses,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn person(&self, slot: usize) -> &'a Person {
        &self.people[slot]
    }

    /// Slot of the first record with `id`.
    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub fn parents(&self, slot: usize) -> &[usize] {
        &self.parents[slot]
    }

    /// Children in snapshot order.
    pub fn children(&self, slot: usize) -> &[usize] {
        &self.children[slot]
    }

    pub fn spouses(&self, slot: usize) -> &[usize] {
        &self.spouses[slot]
    }

    /// Distinct parents of every slot in `slots`, in discovery order.
    pub fn parents_of_all(&self, slots: &[usize]) -> Vec<usize> {
        let mut found = Vec::new();
        for &slot in slots {
            for &parent in self.parents(slot) {
                if !found.contains(&parent) {
                    found.push(parent);
                }
            }
        }
        found
    }
}

fn resolve_links(slots: &HashMap<&str, usize>, own_slot: usize, ids: &[PersonId]) -> Vec<usize> {
    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(&slot) = slots.get(id.as_str()) else {
            continue;
        };
        if slot != own_slot && !resolved.contains(&slot) {
            resolved.push(slot);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::FamilyIndex;
    use crate::model::person::Person;

    #[test]
    fn build_filters_unknown_self_and_duplicate_links() {
        let people = vec![
            Person::new("a", "A").with_parents(["a", "ghost", "b", "b"]),
            Person::new("b", "B").with_spouses(["c", "missing"]),
            Person::new("c", "C").with_parents(["b"]),
        ];
        let index = FamilyIndex::build(&people);

        assert_eq!(index.parents(0), &[1]);
        assert_eq!(index.children(1), &[0, 2]);
        assert_eq!(index.spouses(1), &[2]);
        assert!(index.spouses(2).is_empty());
        assert_eq!(index.slot_of("ghost"), None);
    }

    #[test]
    fn repeated_ids_resolve_to_first_record() {
        let people = vec![
            Person::new("dup", "First"),
            Person::new("dup", "Second"),
            Person::new("kid", "Kid").with_parents(["dup"]),
        ];
        let index = FamilyIndex::build(&people);
        assert_eq!(index.slot_of("dup"), Some(0));
        assert_eq!(index.children(0), &[2]);
        assert!(index.children(1).is_empty());
    }
}
