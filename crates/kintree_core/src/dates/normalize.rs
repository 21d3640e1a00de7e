//! Parsing and anniversary arithmetic over `DateSource` values.

use super::source::DateSource;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Earliest accepted birth year.
pub const MIN_YEAR: i32 = 1800;
/// Ages above this bound are treated as bad data.
pub const MAX_AGE_YEARS: u32 = 130;
/// Placeholder for dates that are missing or unparseable.
pub const NOT_SET_LABEL: &str = "Not set";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));
static MONTH_DAY_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})$").expect("valid m/d/y date regex")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
    "%a %b %d %Y",
];

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Normalizes a raw date against the current local date.
pub fn parse_date(raw: &DateSource) -> Option<NaiveDate> {
    parse_date_as_of(raw, today())
}

/// Normalizes a raw date; `today` bounds the plausible year range.
///
/// Returns `None` for unparseable values, impossible calendar fields
/// (`1990-02-30`) and years outside `MIN_YEAR..=today.year() + 1`.
pub fn parse_date_as_of(raw: &DateSource, today: NaiveDate) -> Option<NaiveDate> {
    let date = match raw {
        DateSource::Calendar(date) => Some(*date),
        DateSource::Instant(instant) => Some(instant.date_naive()),
        DateSource::Seconds { seconds, nanos } => {
            DateTime::<Utc>::from_timestamp(*seconds, *nanos).map(|value| value.date_naive())
        }
        // Zero is the persistence layer's "unset" marker, not the epoch.
        DateSource::EpochMillis(0) => None,
        DateSource::EpochMillis(millis) => {
            DateTime::<Utc>::from_timestamp_millis(*millis).map(|value| value.date_naive())
        }
        DateSource::Text(text) => parse_text(text),
        DateSource::Other(_) => None,
    }?;
    within_plausible_years(date, today)
}

/// Whole years since birth, or `None` when unknown or implausible.
pub fn age(raw: &DateSource, today: NaiveDate) -> Option<u32> {
    let birth = parse_date_as_of(raw, today)?;
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years)
        .ok()
        .filter(|years| *years <= MAX_AGE_YEARS)
}

/// Next occurrence of the month/day pair, today included.
///
/// Feb 29 falls on Mar 1 in common years.
pub fn next_anniversary(raw: &DateSource, today: NaiveDate) -> Option<NaiveDate> {
    let origin = parse_date_as_of(raw, today)?;
    let this_year = anniversary_in(today.year(), origin)?;
    if this_year < today {
        anniversary_in(today.year() + 1, origin)
    } else {
        Some(this_year)
    }
}

/// Days from `today` until the next anniversary (`0` when it is today).
pub fn days_until_anniversary(raw: &DateSource, today: NaiveDate) -> Option<i64> {
    next_anniversary(raw, today).map(|next| (next - today).num_days())
}

/// Long display form, e.g. `March 5, 1990`.
pub fn format_long(raw: Option<&DateSource>, today: NaiveDate) -> String {
    raw.and_then(|value| parse_date_as_of(value, today))
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_SET_LABEL.to_string())
}

/// Short month/day form, e.g. `Mar 5`.
pub fn format_short(raw: Option<&DateSource>, today: NaiveDate) -> Option<String> {
    raw.and_then(|value| parse_date_as_of(value, today))
        .map(|date| date.format("%b %-d").to_string())
}

fn anniversary_in(year: i32, origin: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, origin.month(), origin.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

fn within_plausible_years(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    if date.year() < MIN_YEAR || date.year() > today.year() + 1 {
        return None;
    }
    Some(date)
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_DATE_RE.captures(trimmed) {
        return build_date(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = MONTH_DAY_YEAR_RE.captures(trimmed) {
        return build_date(&caps[3], &caps[1], &caps[2]);
    }

    parse_generic(trimmed)
}

fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.date_naive());
    }
    if let Ok(value) = DateTime::parse_from_rfc2822(text) {
        return Some(value.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|value| value.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::{build_date, parse_text};
    use chrono::NaiveDate;

    #[test]
    fn build_date_rejects_fields_that_do_not_round_trip() {
        assert_eq!(build_date("1990", "02", "30"), None);
        assert_eq!(build_date("1990", "13", "01"), None);
        assert_eq!(
            build_date("2000", "02", "29"),
            NaiveDate::from_ymd_opt(2000, 2, 29)
        );
    }

    #[test]
    fn parse_text_accepts_month_day_year_separators() {
        let expected = NaiveDate::from_ymd_opt(1985, 7, 4);
        assert_eq!(parse_text("7/4/1985"), expected);
        assert_eq!(parse_text("07.04.1985"), expected);
        assert_eq!(parse_text("7-4-1985"), expected);
    }

    #[test]
    fn parse_text_falls_back_to_generic_formats() {
        let expected = NaiveDate::from_ymd_opt(1962, 11, 23);
        assert_eq!(parse_text("November 23, 1962"), expected);
        assert_eq!(parse_text("1962-11-23T08:15:00Z"), expected);
        assert_eq!(parse_text("1962/11/23"), expected);
        assert_eq!(parse_text("not a date"), None);
        assert_eq!(parse_text("   "), None);
    }
}
