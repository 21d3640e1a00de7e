//! Generation resolver.
//!
//! Two modes:
//! - Anchored: breadth-first walk from the self anchor over parent (-1),
//!   child (+1) and spouse (same level) links; first assignment wins. People
//!   the walk never reaches are leveled by relationship label, then default
//!   to the anchor's level.
//! - Ancestry: no anchor, so every person sits one level below their deepest
//!   known parent; people without known parents are roots.
//!
//! Both modes normalize so the smallest level is `1`.

use super::index::FamilyIndex;
use super::title::generation_title;
use crate::dates::{parse_date_as_of, today};
use crate::model::person::{Person, PersonId};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};

/// Raw level of the self anchor before normalization.
pub const ANCHOR_LEVEL: i32 = 0;
/// Level of people without known parents in ancestry mode.
pub const ROOT_LEVEL: i32 = 1;

/// How levels were derived for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Leveled outward from a self anchor.
    Anchored,
    /// Leveled by depth below the oldest known ancestors.
    Ancestry,
}

/// One display band of members sharing a level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationBand {
    /// Normalized, 1-based level.
    pub level: u32,
    pub title: String,
    /// Members in display order.
    pub members: Vec<Person>,
}

/// Aggregate counters for summary surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeStats {
    pub total_generations: usize,
    pub total_members: usize,
    pub largest_generation: usize,
}

/// Resolved, titled and sorted generation layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    pub mode: ResolveMode,
    /// Id of the self anchor, when one was found.
    pub anchor_id: Option<PersonId>,
    /// Normalized level per person id.
    pub levels: BTreeMap<PersonId, u32>,
    /// Bands in ascending level order.
    pub generations: Vec<GenerationBand>,
    pub stats: TreeStats,
}

impl TreeLayout {
    pub fn level_of(&self, id: &str) -> Option<u32> {
        self.levels.get(id).copied()
    }

    pub fn band(&self, level: u32) -> Option<&GenerationBand> {
        self.generations.iter().find(|band| band.level == level)
    }

    /// Level of the anchor, when the tree is anchored.
    pub fn anchor_level(&self) -> Option<u32> {
        self.anchor_id.as_deref().and_then(|id| self.level_of(id))
    }
}

#[derive(Debug, Default)]
struct Placement {
    linked: usize,
    by_label: usize,
    defaulted: usize,
}

/// Resolves generations using the current local date for date sanity checks.
pub fn resolve(people: &[Person]) -> TreeLayout {
    resolve_as_of(people, today())
}

/// Resolves generations for one snapshot.
///
/// Never fails: dangling links are ignored, parent cycles are cut, and every
/// record receives a level.
pub fn resolve_as_of(people: &[Person], today: NaiveDate) -> TreeLayout {
    let index = FamilyIndex::build(people);
    let anchor = find_anchor(people);

    let (raw_levels, placement) = match anchor {
        Some(anchor) => anchored_levels(&index, anchor),
        None => ancestry_levels(&index),
    };
    let levels = normalize(&raw_levels);
    let anchor_level = anchor.map(|slot| levels[slot]);

    let mut grouped: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (slot, level) in levels.iter().enumerate() {
        grouped.entry(*level).or_default().push(slot);
    }

    let birth_dates = people
        .iter()
        .map(|person| {
            person
                .birth_date
                .as_ref()
                .and_then(|raw| parse_date_as_of(raw, today))
        })
        .collect::<Vec<_>>();
    let order = DisplayOrder {
        index: &index,
        anchor,
        birth_dates: &birth_dates,
    };

    let generations = grouped
        .into_iter()
        .map(|(level, mut slots)| {
            slots.sort_by(|left, right| order.compare(*left, *right));
            GenerationBand {
                level,
                title: generation_title(level, anchor_level),
                members: slots
                    .into_iter()
                    .map(|slot| index.person(slot).clone())
                    .collect(),
            }
        })
        .collect::<Vec<_>>();

    let mut level_map = BTreeMap::new();
    for (slot, level) in levels.iter().enumerate() {
        level_map
            .entry(index.person(slot).id.clone())
            .or_insert(*level);
    }

    let stats = TreeStats {
        total_generations: generations.len(),
        total_members: people.len(),
        largest_generation: generations
            .iter()
            .map(|band| band.members.len())
            .max()
            .unwrap_or(0),
    };
    let mode = if anchor.is_some() {
        ResolveMode::Anchored
    } else {
        ResolveMode::Ancestry
    };

    debug!(
        "event=tree_resolve module=tree status=ok mode={:?} members={} generations={} linked={} by_label={} defaulted={}",
        mode,
        stats.total_members,
        stats.total_generations,
        placement.linked,
        placement.by_label,
        placement.defaulted
    );

    TreeLayout {
        mode,
        anchor_id: anchor.map(|slot| index.person(slot).id.clone()),
        levels: level_map,
        generations,
        stats,
    }
}

/// First self-marked record in input order.
fn find_anchor(people: &[Person]) -> Option<usize> {
    let mut markers = people
        .iter()
        .enumerate()
        .filter(|(_, person)| person.is_self_marker())
        .map(|(slot, _)| slot);
    let anchor = markers.next();
    let extra = markers.count();
    if extra > 0 {
        warn!(
            "event=self_anchor_ambiguous module=tree status=first_wins markers={}",
            extra + 1
        );
    }
    anchor
}

fn anchored_levels(index: &FamilyIndex<'_>, anchor: usize) -> (Vec<i32>, Placement) {
    let mut levels: Vec<Option<i32>> = vec![None; index.len()];
    let mut queue = VecDeque::new();
    assign(&mut levels, &mut queue, anchor, ANCHOR_LEVEL);

    while let Some((slot, level)) = queue.pop_front() {
        for &parent in index.parents(slot) {
            assign(&mut levels, &mut queue, parent, level - 1);
        }
        for &child in index.children(slot) {
            assign(&mut levels, &mut queue, child, level + 1);
        }
        for &spouse in index.spouses(slot) {
            assign(&mut levels, &mut queue, spouse, level);
        }
    }

    let mut placement = Placement::default();
    let resolved = levels
        .into_iter()
        .enumerate()
        .map(|(slot, level)| {
            if let Some(level) = level {
                placement.linked += 1;
                return level;
            }
            match index.person(slot).relation().generation_offset() {
                Some(offset) => {
                    placement.by_label += 1;
                    ANCHOR_LEVEL + offset
                }
                None => {
                    placement.defaulted += 1;
                    ANCHOR_LEVEL
                }
            }
        })
        .collect();
    (resolved, placement)
}

fn assign(
    levels: &mut [Option<i32>],
    queue: &mut VecDeque<(usize, i32)>,
    slot: usize,
    level: i32,
) {
    if levels[slot].is_none() {
        levels[slot] = Some(level);
        queue.push_back((slot, level));
    }
}

struct Frame {
    slot: usize,
    next_parent: usize,
    deepest_parent: Option<i32>,
}

impl Frame {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            next_parent: 0,
            deepest_parent: None,
        }
    }

    fn observe(&mut self, parent_level: i32) {
        self.deepest_parent = Some(
            self.deepest_parent
                .map_or(parent_level, |deepest| deepest.max(parent_level)),
        );
    }
}

/// Memoized `max(parent levels) + 1`, walked with an explicit stack.
///
/// A parent that is still on the stack closes a cycle and counts as
/// `ROOT_LEVEL` for the person that reached it.
fn ancestry_levels(index: &FamilyIndex<'_>) -> (Vec<i32>, Placement) {
    let mut levels: Vec<Option<i32>> = vec![None; index.len()];
    let mut in_progress = vec![false; index.len()];
    let mut placement = Placement::default();

    for start in 0..index.len() {
        if levels[start].is_some() {
            continue;
        }
        in_progress[start] = true;
        let mut stack = vec![Frame::new(start)];

        while let Some(frame) = stack.last_mut() {
            let parents = index.parents(frame.slot);
            if let Some(&parent) = parents.get(frame.next_parent) {
                frame.next_parent += 1;
                if let Some(level) = levels[parent] {
                    frame.observe(level);
                } else if in_progress[parent] {
                    frame.observe(ROOT_LEVEL);
                } else {
                    in_progress[parent] = true;
                    stack.push(Frame::new(parent));
                }
                continue;
            }

            let Some(done) = stack.pop() else {
                break;
            };
            let level = done.deepest_parent.map_or(ROOT_LEVEL, |deepest| deepest + 1);
            if done.deepest_parent.is_some() {
                placement.linked += 1;
            } else {
                placement.defaulted += 1;
            }
            levels[done.slot] = Some(level);
            in_progress[done.slot] = false;
            if let Some(child_frame) = stack.last_mut() {
                child_frame.observe(level);
            }
        }
    }

    let resolved = levels
        .into_iter()
        .map(|level| level.unwrap_or(ROOT_LEVEL))
        .collect();
    (resolved, placement)
}

/// Raw ancestry-depth levels, without normalization.
pub(crate) fn ancestry_depths(index: &FamilyIndex<'_>) -> Vec<i32> {
    ancestry_levels(index).0
}

/// Shifts raw levels so the minimum becomes `1`.
fn normalize(raw_levels: &[i32]) -> Vec<u32> {
    let Some(min) = raw_levels.iter().copied().min() else {
        return Vec::new();
    };
    raw_levels
        .iter()
        .map(|level| u32::try_from(i64::from(*level) - i64::from(min) + 1).unwrap_or(u32::MAX))
        .collect()
}

struct DisplayOrder<'i, 'a> {
    index: &'i FamilyIndex<'a>,
    anchor: Option<usize>,
    birth_dates: &'i [Option<NaiveDate>],
}

impl DisplayOrder<'_, '_> {
    /// Anchor first, then the anchor's spouses, then by birth date (dated
    /// before undated), then by name.
    fn compare(&self, left: usize, right: usize) -> Ordering {
        self.pin_rank(left)
            .cmp(&self.pin_rank(right))
            .then_with(|| compare_dates(self.birth_dates[left], self.birth_dates[right]))
            .then_with(|| {
                compare_names(
                    &self.index.person(left).name,
                    &self.index.person(right).name,
                )
            })
    }

    fn pin_rank(&self, slot: usize) -> u8 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        if slot == anchor {
            return 0;
        }
        let candidate = &self.index.person(slot).id;
        if self
            .index
            .person(anchor)
            .spouse_ids
            .iter()
            .any(|id| id == candidate)
        {
            1
        } else {
            2
        }
    }
}

fn compare_dates(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive name order with a case-sensitive tie-break.
pub(crate) fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::{normalize, resolve_as_of, ResolveMode};
    use crate::model::person::Person;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn normalize_shifts_minimum_to_one() {
        assert_eq!(normalize(&[-2, 0, 1]), vec![1, 3, 4]);
        assert_eq!(normalize(&[5, 7]), vec![1, 3]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn long_parent_chain_does_not_recurse() {
        let people = (0..5_000)
            .map(|i| {
                let person = Person::new(format!("p{i}"), format!("P{i}"));
                if i == 0 {
                    person
                } else {
                    person.with_parents([format!("p{}", i - 1)])
                }
            })
            .rev()
            .collect::<Vec<_>>();

        let layout = resolve_as_of(&people, today());
        assert_eq!(layout.mode, ResolveMode::Ancestry);
        assert_eq!(layout.level_of("p0"), Some(1));
        assert_eq!(layout.level_of("p4999"), Some(5_000));
    }
}
