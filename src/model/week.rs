// File: ./src/model/week.rs
// ISO-8601 calendar weeks (Monday start, week 1 holds the first Thursday)
use chrono::{Datelike, Days, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One ISO-8601 week, identified by its week number and ISO year.
///
/// `start_date` is always the Monday of that week. The ISO year is the
/// calendar year of the week's Thursday, so it can differ from the calendar
/// year of `start_date` around New Year (2018-12-31 is in week 1 of 2019).
///
/// Serialized as its identifier string (`"2020-W53"`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarWeek {
    iso_year: i32,
    week: u32,
    start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWeekError {
    #[error("expected a week like 2024-W07, got '{0}'")]
    Malformed(String),
    #[error("{iso_year} has no ISO week {week}")]
    NoSuchWeek { iso_year: i32, week: u32 },
}

/// Thursday of the Monday-based week containing `date`.
fn thursday_of(date: NaiveDate) -> Option<NaiveDate> {
    let weekday = date.weekday().number_from_monday();
    if weekday <= 4 {
        date.checked_add_days(Days::new(u64::from(4 - weekday)))
    } else {
        date.checked_sub_days(Days::new(u64::from(weekday - 4)))
    }
}

/// Monday of ISO week 1. January 4th always lies in week 1.
fn first_week_start(iso_year: i32) -> Option<NaiveDate> {
    let jan4 = NaiveDate::from_ymd_opt(iso_year, 1, 4)?;
    jan4.checked_sub_days(Days::new(u64::from(jan4.weekday().num_days_from_monday())))
}

impl CalendarWeek {
    /// Computes the ISO week a date belongs to.
    ///
    /// # Panics
    /// If the Monday or Sunday of the date's week lies outside chrono's
    /// representable range, i.e. for the first and last few days of
    /// `NaiveDate::MIN..=NaiveDate::MAX`. Use [`CalendarWeek::checked_from_date`]
    /// for dates that can come near those limits.
    pub fn from_date(date: NaiveDate) -> Self {
        match Self::checked_from_date(date) {
            Some(cw) => cw,
            None => panic!("week of {} is outside the supported date range", date),
        }
    }

    /// Like [`CalendarWeek::from_date`], but `None` when the week cannot be
    /// represented in full.
    pub fn checked_from_date(date: NaiveDate) -> Option<Self> {
        let thursday = thursday_of(date)?;
        let iso_year = thursday.year();
        let start_of_first_week =
            thursday.checked_sub_days(Days::new(u64::from(thursday.ordinal0() / 7) * 7 + 3))?;
        debug_assert_eq!(Some(start_of_first_week), first_week_start(iso_year));
        let days = (thursday - start_of_first_week).num_days();
        let week = (days as u64 + 1).div_ceil(7) as u32;
        let start_date = thursday.checked_sub_days(Days::new(3))?;
        start_date.checked_add_days(Days::new(6))?;
        Some(Self {
            iso_year,
            week,
            start_date,
        })
    }

    /// Week containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Looks a week up by its identifier. `None` if the ISO year has no such week.
    pub fn from_iso(iso_year: i32, week: u32) -> Option<Self> {
        if week == 0 || week > iso_weeks_in_year(iso_year) {
            return None;
        }
        let start_date = first_week_start(iso_year)?.checked_add_days(Days::new(u64::from(week - 1) * 7))?;
        start_date.checked_add_days(Days::new(6))?;
        Some(Self {
            iso_year,
            week,
            start_date,
        })
    }

    /// Moves `offset` weeks forward (or backward when negative).
    ///
    /// The Monday is rebuilt from `(week, iso_year)` and the result goes back
    /// through [`CalendarWeek::from_date`], so week and year stay consistent
    /// across year boundaries.
    ///
    /// # Panics
    /// If the target week is outside chrono's date range. See
    /// [`CalendarWeek::checked_step`].
    pub fn step(self, offset: i64) -> Self {
        match self.checked_step(offset) {
            Some(cw) => cw,
            None => panic!("{} moved by {} weeks is outside the supported date range", self, offset),
        }
    }

    /// Like [`CalendarWeek::step`], but `None` when the target week cannot be represented.
    pub fn checked_step(self, offset: i64) -> Option<Self> {
        let monday = first_week_start(self.iso_year)
            .and_then(|start| start.checked_add_days(Days::new(u64::from(self.week - 1) * 7)))
            .unwrap_or(self.start_date);
        let target = monday.checked_add_signed(Duration::try_weeks(offset)?)?;
        Self::checked_from_date(target)
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn iso_year(&self) -> i32 {
        self.iso_year
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Sunday of the week.
    pub fn end_date(&self) -> NaiveDate {
        increment_date(self.start_date, 6)
    }

    /// Monday through Sunday.
    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| increment_date(self.start_date, i as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date()
    }

    /// Panel header, e.g. `CW 05`.
    pub fn label(&self) -> String {
        format!("CW {:02}", self.week)
    }
}

/// Adds a (possibly negative) number of days to a date.
pub fn increment_date(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Number of ISO weeks in a year: 53 for "long" years, otherwise 52.
pub fn iso_weeks_in_year(iso_year: i32) -> u32 {
    // December 28th always falls in the last ISO week of its year.
    NaiveDate::from_ymd_opt(iso_year, 12, 28)
        .and_then(CalendarWeek::checked_from_date)
        .map(|cw| cw.week)
        .unwrap_or(52)
}

impl fmt::Display for CalendarWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.iso_year, self.week)
    }
}

impl FromStr for CalendarWeek {
    type Err = ParseWeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || ParseWeekError::Malformed(trimmed.to_string());
        let (year, week) = trimmed
            .split_once("-W")
            .or_else(|| trimmed.split_once("-w"))
            .ok_or_else(malformed)?;
        let iso_year = year.parse::<i32>().map_err(|_| malformed())?;
        let week = week.parse::<u32>().map_err(|_| malformed())?;
        Self::from_iso(iso_year, week).ok_or(ParseWeekError::NoSuchWeek { iso_year, week })
    }
}

impl From<CalendarWeek> for String {
    fn from(cw: CalendarWeek) -> Self {
        cw.to_string()
    }
}

impl TryFrom<String> for CalendarWeek {
    type Error = ParseWeekError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_year_boundaries() {
        let cw = CalendarWeek::from_date(date(2018, 12, 31));
        assert_eq!((cw.week(), cw.iso_year()), (1, 2019));
        assert_eq!(cw.start_date(), date(2018, 12, 31));

        let cw = CalendarWeek::from_date(date(2021, 1, 1));
        assert_eq!((cw.week(), cw.iso_year()), (53, 2020));
        assert_eq!(cw.start_date(), date(2020, 12, 28));

        let cw = CalendarWeek::from_date(date(2021, 1, 4));
        assert_eq!((cw.week(), cw.iso_year()), (1, 2021));
    }

    #[test]
    fn agrees_with_chrono_iso_week() {
        let mut d = date(1999, 12, 1);
        while d < date(2031, 2, 1) {
            let cw = CalendarWeek::from_date(d);
            let iso = d.iso_week();
            assert_eq!((cw.week(), cw.iso_year()), (iso.week(), iso.year()), "{d}");
            assert_eq!(cw.start_date().weekday(), Weekday::Mon);
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn step_over_year_end() {
        let cw = CalendarWeek::from_iso(2020, 52).unwrap();
        let next = cw.step(2);
        assert_eq!(next.to_string(), "2021-W02");
        assert_eq!(next.start_date(), date(2021, 1, 11));
        assert_eq!(next.step(-2), cw);
    }

    #[test]
    fn out_of_range_steps_are_rejected() {
        let cw = CalendarWeek::from_iso(2020, 52).unwrap();
        assert_eq!(cw.checked_step(100_000_000), None);
        assert_eq!(cw.checked_step(-100_000_000), None);
        assert_eq!(cw.checked_step(i64::MAX), None);
        assert_eq!(cw.checked_step(2), Some(cw.step(2)));
    }

    #[test]
    fn weeks_at_the_edge_of_the_date_range() {
        assert_eq!(CalendarWeek::checked_from_date(NaiveDate::MAX), None);
        assert_eq!(CalendarWeek::checked_from_date(NaiveDate::MIN), None);

        // Any week that fits completely still resolves.
        let late = NaiveDate::MAX - Duration::days(14);
        let cw = CalendarWeek::checked_from_date(late).unwrap();
        assert!(cw.contains(late));
        assert_eq!(cw.days()[6], cw.end_date());
        assert_eq!(cw.checked_step(3), None);
    }

    #[test]
    fn long_and_short_years() {
        assert_eq!(iso_weeks_in_year(2020), 53);
        assert_eq!(iso_weeks_in_year(2021), 52);
        assert_eq!(iso_weeks_in_year(2026), 53);
        assert!(CalendarWeek::from_iso(2021, 53).is_none());
        assert!(CalendarWeek::from_iso(2021, 0).is_none());
    }

    #[test]
    fn parse_and_display() {
        let cw: CalendarWeek = "2024-w7".parse().unwrap();
        assert_eq!(cw.to_string(), "2024-W07");
        assert_eq!(cw.label(), "CW 07");
        assert_eq!(
            "2021-W53".parse::<CalendarWeek>(),
            Err(ParseWeekError::NoSuchWeek {
                iso_year: 2021,
                week: 53
            })
        );
        assert!(matches!(
            "week 7".parse::<CalendarWeek>(),
            Err(ParseWeekError::Malformed(_))
        ));
    }

    #[test]
    fn days_cover_monday_to_sunday() {
        let cw = CalendarWeek::from_date(date(2024, 2, 14));
        let days = cw.days();
        assert_eq!(days[0], date(2024, 2, 12));
        assert_eq!(days[6], cw.end_date());
        assert!(days.iter().all(|d| cw.contains(*d)));
        assert!(!cw.contains(date(2024, 2, 19)));
    }
}
