use chrono::{DateTime, NaiveDate, Utc};
use kintree_core::dates::{
    age, days_until_anniversary, format_long, format_short, next_anniversary, parse_date_as_of,
    NOT_SET_LABEL,
};
use kintree_core::DateSource;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn parses_every_supported_shape() {
    let expected = Some(ymd(1990, 1, 1));
    let instant: DateTime<Utc> = "1990-01-01T12:30:00Z".parse().unwrap();
    let shapes = [
        DateSource::Calendar(ymd(1990, 1, 1)),
        DateSource::Instant(instant),
        DateSource::Seconds {
            seconds: 631_152_000,
            nanos: 0,
        },
        DateSource::EpochMillis(631_152_000_000),
        DateSource::text("1990-01-01"),
        DateSource::text("1/1/1990"),
        DateSource::text("01.01.1990"),
        DateSource::text("January 1, 1990"),
        DateSource::text("1990-01-01T08:00:00+02:00"),
    ];
    for shape in shapes {
        assert_eq!(parse_date_as_of(&shape, today()), expected, "parsing {shape:?}");
    }
}

#[test]
fn rejects_impossible_calendar_fields() {
    assert_eq!(parse_date_as_of(&DateSource::text("1990-02-30"), today()), None);
    assert_eq!(parse_date_as_of(&DateSource::text("2/30/1990"), today()), None);
    assert_eq!(parse_date_as_of(&DateSource::text("13/01/1990"), today()), None);
}

#[test]
fn rejects_implausible_years() {
    assert_eq!(parse_date_as_of(&DateSource::text("1799-12-31"), today()), None);
    assert_eq!(
        parse_date_as_of(&DateSource::text("1800-01-01"), today()),
        Some(ymd(1800, 1, 1))
    );
    assert_eq!(
        parse_date_as_of(&DateSource::text("2027-12-31"), today()),
        Some(ymd(2027, 12, 31))
    );
    assert_eq!(parse_date_as_of(&DateSource::text("2028-01-01"), today()), None);
}

#[test]
fn absent_markers_normalize_to_none() {
    assert_eq!(parse_date_as_of(&DateSource::EpochMillis(0), today()), None);
    assert_eq!(parse_date_as_of(&DateSource::text(""), today()), None);
    assert_eq!(parse_date_as_of(&DateSource::text("someday"), today()), None);
    assert_eq!(
        parse_date_as_of(&DateSource::Other(serde_json::json!({"when": 1})), today()),
        None
    );
}

#[test]
fn reparsing_iso_output_reproduces_the_date() {
    let inputs = [
        DateSource::text("7/4/1985"),
        DateSource::text("March 5, 1962"),
        DateSource::Seconds {
            seconds: 1_000_000_000,
            nanos: 0,
        },
        DateSource::EpochMillis(-86_400_000),
    ];
    for input in inputs {
        let first = parse_date_as_of(&input, today()).unwrap();
        let iso_date = DateSource::text(first.format("%Y-%m-%d").to_string());
        let iso_instant = DateSource::text(format!("{}T00:00:00.000Z", first.format("%Y-%m-%d")));
        assert_eq!(parse_date_as_of(&iso_date, today()), Some(first));
        assert_eq!(parse_date_as_of(&iso_instant, today()), Some(first));
    }
}

#[test]
fn age_counts_whole_years() {
    assert_eq!(age(&DateSource::text("1996-10-19"), today()), Some(30));
    assert_eq!(age(&DateSource::text("1996-10-20"), today()), Some(29));
    assert_eq!(age(&DateSource::text("1996-11-01"), today()), Some(29));
    assert_eq!(age(&DateSource::text("2026-10-19"), today()), Some(0));
}

#[test]
fn age_is_none_outside_sanity_bounds() {
    assert_eq!(age(&DateSource::text("1850-01-01"), today()), None);
    assert_eq!(age(&DateSource::text("2027-03-01"), today()), None);
    assert_eq!(age(&DateSource::text("garbage"), today()), None);
    assert_eq!(age(&DateSource::text("1896-10-19"), today()), Some(130));
}

#[test]
fn next_anniversary_includes_today_and_rolls_over() {
    assert_eq!(
        next_anniversary(&DateSource::text("1990-10-19"), today()),
        Some(ymd(2026, 10, 19))
    );
    assert_eq!(
        next_anniversary(&DateSource::text("1990-12-25"), today()),
        Some(ymd(2026, 12, 25))
    );
    assert_eq!(
        next_anniversary(&DateSource::text("1990-03-05"), today()),
        Some(ymd(2027, 3, 5))
    );
}

#[test]
fn leap_day_anniversary_falls_on_march_first_in_common_years() {
    assert_eq!(
        next_anniversary(&DateSource::text("2000-02-29"), today()),
        Some(ymd(2027, 3, 1))
    );
    assert_eq!(
        next_anniversary(&DateSource::text("2000-02-29"), ymd(2028, 1, 10)),
        Some(ymd(2028, 2, 29))
    );
}

#[test]
fn days_until_counts_from_today() {
    assert_eq!(days_until_anniversary(&DateSource::text("1990-10-19"), today()), Some(0));
    assert_eq!(days_until_anniversary(&DateSource::text("1990-10-25"), today()), Some(6));
    assert_eq!(days_until_anniversary(&DateSource::text("1990-10-18"), today()), Some(364));
}

#[test]
fn display_formats_fall_back_when_unset() {
    let raw = DateSource::text("1990-03-05");
    assert_eq!(format_long(Some(&raw), today()), "March 5, 1990");
    assert_eq!(format_short(Some(&raw), today()).as_deref(), Some("Mar 5"));
    assert_eq!(format_long(None, today()), NOT_SET_LABEL);
    assert_eq!(format_short(Some(&DateSource::text("??")), today()), None);
}
