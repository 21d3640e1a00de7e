//! Home dashboard and birthday calendar queries.
//!
//! # Responsibility
//! - Count generations the quick way the summary card expects.
//! - List upcoming and per-month birthdays, and recently added members.
//!
//! # Invariants
//! - Every query is a pure function of the snapshot and `today`.
//! - Members with unparseable birth dates are skipped, never reported.

use crate::dates::{
    age, days_until_anniversary, format_short, next_anniversary, parse_date_as_of, MAX_AGE_YEARS,
};
use crate::model::person::{Person, PersonId};
use crate::tree::{ancestry_depths, FamilyIndex};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// One entry in the upcoming birthdays widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    pub id: PersonId,
    pub name: String,
    pub next_birthday: NaiveDate,
    /// `0` when the birthday is today.
    pub days_until: i64,
    /// Age reached on `next_birthday`, when plausible.
    pub turning: Option<u32>,
}

/// One entry in the month view of the birthday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBirthday {
    pub id: PersonId,
    pub name: String,
    pub day: u32,
    /// Short month/day label, e.g. `Nov 1`.
    pub label: String,
    pub days_until: i64,
    /// Age reached on the next occurrence, when plausible.
    pub turning: Option<u32>,
}

/// Counters for the birthday calendar stats card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CalendarStats {
    /// Birthdays in the current month.
    pub this_month: usize,
    /// Birthdays within the upcoming window.
    pub upcoming: usize,
    /// Members with a usable birth date.
    pub total: usize,
    /// Rounded mean age over plausible ages; `0` when none.
    pub average_age: u32,
}

/// Counters for the home dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub total_members: usize,
    /// Birthdays within the configured window (uncapped).
    pub upcoming_birthdays: usize,
    pub generations: usize,
    pub locations: usize,
}

/// Distinct generation count for the summary card.
///
/// Levels come from ancestry depth. Members without known parents are then
/// re-leveled by their label's coarse tier or, failing that, by the first
/// already-leveled spouse. Returns `0` for an empty snapshot.
pub fn quick_generation_count(people: &[Person]) -> usize {
    if people.is_empty() {
        return 0;
    }

    let index = FamilyIndex::build(people);
    let mut levels = ancestry_depths(&index);
    for slot in 0..index.len() {
        if !index.parents(slot).is_empty() {
            continue;
        }
        if let Some(tier) = index.person(slot).relation().dashboard_tier() {
            levels[slot] = i32::try_from(tier).unwrap_or(i32::MAX);
        } else if let Some(&spouse) = index.spouses(slot).first() {
            levels[slot] = levels[spouse];
        }
    }

    levels.into_iter().collect::<BTreeSet<_>>().len()
}

/// Birthdays falling within `window_days` of `today`, soonest first.
pub fn upcoming_birthdays(
    people: &[Person],
    today: NaiveDate,
    window_days: u32,
    limit: usize,
) -> Vec<UpcomingBirthday> {
    let mut upcoming = people
        .iter()
        .filter_map(|person| upcoming_entry(person, today))
        .filter(|entry| entry.days_until <= i64::from(window_days))
        .collect::<Vec<_>>();
    upcoming.sort_by(|left, right| {
        left.days_until
            .cmp(&right.days_until)
            .then_with(|| left.name.cmp(&right.name))
    });
    upcoming.truncate(limit);
    upcoming
}

/// Number of birthdays within `window_days`, without a display cap.
pub fn count_upcoming_birthdays(people: &[Person], today: NaiveDate, window_days: u32) -> usize {
    upcoming_birthdays(people, today, window_days, usize::MAX).len()
}

/// Members born in `month` (1-12), ordered by day of month.
pub fn birthdays_in_month(people: &[Person], month: u32, today: NaiveDate) -> Vec<MonthBirthday> {
    let mut entries = people
        .iter()
        .filter_map(|person| {
            let raw = person.birth_date.as_ref()?;
            let birth = parse_date_as_of(raw, today)?;
            if birth.month() != month {
                return None;
            }
            let next = next_anniversary(raw, today)?;
            Some(MonthBirthday {
                id: person.id.clone(),
                name: person.display_name().to_string(),
                day: birth.day(),
                label: format_short(Some(raw), today)?,
                days_until: days_until_anniversary(raw, today)?,
                turning: turning_age(birth, next),
            })
        })
        .collect::<Vec<_>>();
    entries.sort_by(|left, right| left.day.cmp(&right.day).then_with(|| left.name.cmp(&right.name)));
    entries
}

/// Stats card for the birthday calendar.
pub fn calendar_stats(people: &[Person], today: NaiveDate, window_days: u32) -> CalendarStats {
    let mut stats = CalendarStats::default();
    let mut age_sum = 0_u64;
    let mut aged = 0_u64;
    for raw in people.iter().filter_map(|person| person.birth_date.as_ref()) {
        let Some(birth) = parse_date_as_of(raw, today) else {
            continue;
        };
        stats.total += 1;
        if birth.month() == today.month() {
            stats.this_month += 1;
        }
        if days_until_anniversary(raw, today).is_some_and(|days| days <= i64::from(window_days)) {
            stats.upcoming += 1;
        }
        if let Some(years) = age(raw, today) {
            age_sum += u64::from(years);
            aged += 1;
        }
    }
    if aged > 0 {
        // Half rounds up.
        stats.average_age = u32::try_from((2 * age_sum + aged) / (2 * aged)).unwrap_or(u32::MAX);
    }
    stats
}

/// Members with a creation timestamp, newest first.
pub fn recently_added(people: &[Person], limit: usize) -> Vec<&Person> {
    let mut dated = people
        .iter()
        .filter(|person| person.created_at.is_some())
        .collect::<Vec<_>>();
    dated.sort_by_key(|person| {
        std::cmp::Reverse(
            person
                .created_at
                .as_ref()
                .map(|created| created.epoch_millis())
                .unwrap_or(0),
        )
    });
    dated.truncate(limit);
    dated
}

/// Count of distinct, trimmed, non-empty locations.
pub fn distinct_locations(people: &[Person]) -> usize {
    people
        .iter()
        .filter_map(Person::location_label)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Builds the stat-card counters.
pub fn summarize(people: &[Person], today: NaiveDate, window_days: u32) -> DashboardSummary {
    DashboardSummary {
        total_members: people.len(),
        upcoming_birthdays: count_upcoming_birthdays(people, today, window_days),
        generations: quick_generation_count(people),
        locations: distinct_locations(people),
    }
}

fn upcoming_entry(person: &Person, today: NaiveDate) -> Option<UpcomingBirthday> {
    let raw = person.birth_date.as_ref()?;
    let birth = parse_date_as_of(raw, today)?;
    let next = next_anniversary(raw, today)?;
    Some(UpcomingBirthday {
        id: person.id.clone(),
        name: person.display_name().to_string(),
        next_birthday: next,
        days_until: (next - today).num_days(),
        turning: turning_age(birth, next),
    })
}

fn turning_age(birth: NaiveDate, next: NaiveDate) -> Option<u32> {
    u32::try_from(next.year() - birth.year())
        .ok()
        .filter(|years| *years <= MAX_AGE_YEARS)
}

#[cfg(test)]
mod tests {
    use super::distinct_locations;
    use crate::model::person::Person;

    #[test]
    fn distinct_locations_trims_and_skips_blank() {
        let mut a = Person::new("a", "A");
        a.location = Some(" Austin ".to_string());
        let mut b = Person::new("b", "B");
        b.location = Some("Lisbon".to_string());
        let mut e = Person::new("e", "E");
        e.location = Some("Austin".to_string());
        let mut c = Person::new("c", "C");
        c.location = Some("   ".to_string());
        let d = Person::new("d", "D");

        assert_eq!(distinct_locations(&[a, b, c, d, e]), 2);
    }
}
