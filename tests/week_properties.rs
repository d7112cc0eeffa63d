use chrono::{Datelike, Duration, NaiveDate, Weekday};
use cwplan::model::{CalendarWeek, increment_date};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Days since 1900-01-01, up to the end of 2199.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..109_572).prop_map(|n| date(1900, 1, 1) + Duration::days(n))
}

proptest! {
    #[test]
    fn start_date_is_always_monday(d in any_date()) {
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!(cw.start_date().weekday(), Weekday::Mon);
        prop_assert!(cw.contains(d));
        prop_assert!((1..=53).contains(&cw.week()));
    }

    #[test]
    fn same_week_same_identifier(d in any_date(), shift in 0i64..7) {
        let monday = CalendarWeek::from_date(d).start_date();
        let other = CalendarWeek::from_date(increment_date(monday, shift));
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!((cw.week(), cw.iso_year()), (other.week(), other.iso_year()));
    }

    #[test]
    fn step_zero_is_identity(d in any_date()) {
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!(cw.step(0), cw);
    }

    #[test]
    fn steps_add_up(d in any_date(), m in -300i64..300, n in -300i64..300) {
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!(cw.step(m).step(n), cw.step(m + n));
    }

    #[test]
    fn step_moves_start_by_whole_weeks(d in any_date(), n in -200i64..200) {
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!(cw.step(n).start_date(), cw.start_date() + Duration::weeks(n));
    }

    #[test]
    fn identifier_round_trips_through_text(d in any_date()) {
        let cw = CalendarWeek::from_date(d);
        prop_assert_eq!(cw.to_string().parse::<CalendarWeek>(), Ok(cw));
    }
}

#[test]
fn last_day_of_2018_is_first_week_of_2019() {
    let cw = CalendarWeek::from_date(date(2018, 12, 31));
    assert_eq!(cw.week(), 1);
    assert_eq!(cw.iso_year(), 2019);
}

#[test]
fn first_day_of_2021_is_week_53_of_2020() {
    let cw = CalendarWeek::from_date(date(2021, 1, 1));
    assert_eq!(cw.week(), 53);
    assert_eq!(cw.iso_year(), 2020);
}

#[test]
fn stepping_from_week_52_of_2020() {
    let cw = CalendarWeek::from_iso(2020, 52).unwrap();
    let stepped = cw.step(2);
    assert_eq!((stepped.week(), stepped.iso_year()), (2, 2021));
}

#[test]
fn serializes_as_identifier() {
    let cw = CalendarWeek::from_date(date(2024, 2, 14));
    assert_eq!(serde_json::to_string(&cw).unwrap(), "\"2024-W07\"");
    let back: CalendarWeek = serde_json::from_str("\"2024-W07\"").unwrap();
    assert_eq!(back, cw);
    assert!(serde_json::from_str::<CalendarWeek>("\"2023-W53\"").is_err());
}

#[test]
fn stepping_past_the_date_range() {
    let cw = CalendarWeek::from_iso(2020, 52).unwrap();
    assert_eq!(cw.checked_step(100_000_000), None);
    assert_eq!(cw.checked_step(i64::MIN), None);
    assert_eq!(cw.checked_step(-2), Some(CalendarWeek::from_iso(2020, 50).unwrap()));
}
