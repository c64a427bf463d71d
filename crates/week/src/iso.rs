use std::fmt;

use time::{Date, Duration, Month, util::weeks_in_year};

use crate::{Result, WeekError, WeekStart};

/// Years accepted as an ISO week-year.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// 0001-01-01, a Monday.
const FIRST_DAY: Date = match Date::from_calendar_date(MIN_YEAR, Month::January, 1) {
    Ok(date) => date,
    Err(_) => panic!("invalid first supported day"),
};

const LAST_DAY: Date = match Date::from_calendar_date(MAX_YEAR, Month::December, 31) {
    Ok(date) => date,
    Err(_) => panic!("invalid last supported day"),
};

/// ISO-8601 week key: week-year plus week number (1..=53).
///
/// The week-year differs from the calendar year for the few days around January 1st
/// that belong to the neighbouring year's first or last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    year: i32,
    week: u8,
    monday: Date,
}

impl IsoWeek {
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(WeekError::InvalidYear(year.to_string()));
        }

        if week == 0 {
            return Err(WeekError::InvalidWeekNumber(week.to_string()));
        }

        let max = weeks_in_year(year);
        if week > u32::from(max) {
            return Err(WeekError::WeekOutOfRange { year, week, max });
        }

        // January 4th is always in week 1.
        let jan_4 = Date::from_calendar_date(year, Month::January, 4)
            .map_err(|e| WeekError::InvalidDate(e.to_string()))?;
        let monday = start_of_iso_week(jan_4)
            .date()
            .saturating_add(Duration::weeks(i64::from(week) - 1));

        Ok(Self {
            year,
            week: week as u8,
            monday,
        })
    }

    /// Builds a key from raw path parameters such as `/2024/7`.
    pub fn parse(year: &str, week: &str) -> Result<Self> {
        let year = year
            .parse::<i32>()
            .map_err(|_| WeekError::InvalidYear(year.to_owned()))?;

        let week = week
            .parse::<u32>()
            .map_err(|_| WeekError::InvalidWeekNumber(week.to_owned()))?;

        Self::new(year, week)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u8 {
        self.week
    }

    /// Monday starting this week.
    pub fn start(&self) -> WeekStart {
        WeekStart::from_monday(self.monday)
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Monday of the ISO week containing `date`. Sunday belongs to the week that started
/// six days earlier.
///
/// Dates outside years 1 to 9999 are clamped into that range first.
pub fn start_of_iso_week(date: Date) -> WeekStart {
    let date = date.clamp(FIRST_DAY, LAST_DAY);
    let offset = date.weekday().number_days_from_monday();

    WeekStart::from_monday(date.saturating_sub(Duration::days(i64::from(offset))))
}

/// ISO week-year and week number of `date`, clamped like [`start_of_iso_week`].
pub fn iso_week_of(date: Date) -> IsoWeek {
    let date = date.clamp(FIRST_DAY, LAST_DAY);
    // The Thursday of a week decides which year the week belongs to.
    let offset = i64::from(date.weekday().number_days_from_monday());
    let thursday = date.saturating_add(Duration::days(3 - offset));

    IsoWeek {
        year: thursday.year(),
        week: ((thursday.ordinal() - 1) / 7 + 1) as u8,
        monday: start_of_iso_week(date).date(),
    }
}

pub fn start_date_from_iso_week(year: i32, week: u32) -> Result<WeekStart> {
    Ok(IsoWeek::new(year, week)?.start())
}

/// Renders `YYYY-MM-DD` from the calendar fields of `date`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Weekday, macros::date};

    #[test]
    fn test_start_of_iso_week_midweek() {
        let start = start_of_iso_week(date!(2024 - 01 - 04));
        assert_eq!(start.date(), date!(2024 - 01 - 01));
    }

    #[test]
    fn test_start_of_iso_week_sunday_goes_back() {
        let start = start_of_iso_week(date!(2024 - 01 - 07));
        assert_eq!(start.date(), date!(2024 - 01 - 01));
        assert_eq!(start.date().weekday(), Weekday::Monday);
    }

    #[test]
    fn test_start_of_iso_week_monday_is_fixed_point() {
        let monday = date!(2024 - 01 - 08);
        assert_eq!(start_of_iso_week(monday).date(), monday);
    }

    #[test]
    fn test_iso_week_of_year_boundary() {
        let week = iso_week_of(date!(2023 - 01 - 01));
        assert_eq!((week.year(), week.week()), (2022, 52));

        let week = iso_week_of(date!(2024 - 12 - 30));
        assert_eq!((week.year(), week.week()), (2025, 1));

        let week = iso_week_of(date!(2021 - 01 - 03));
        assert_eq!((week.year(), week.week()), (2020, 53));
    }

    #[test]
    fn test_start_date_from_iso_week() {
        assert_eq!(
            start_date_from_iso_week(2024, 1).unwrap().date(),
            date!(2024 - 01 - 01)
        );
        assert_eq!(
            start_date_from_iso_week(2023, 1).unwrap().date(),
            date!(2023 - 01 - 02)
        );
        assert_eq!(
            start_date_from_iso_week(2020, 53).unwrap().date(),
            date!(2020 - 12 - 28)
        );
        assert_eq!(
            start_date_from_iso_week(2026, 1).unwrap().date(),
            date!(2025 - 12 - 29)
        );
    }

    #[test]
    fn test_week_out_of_range() {
        assert_eq!(
            start_date_from_iso_week(2023, 53),
            Err(WeekError::WeekOutOfRange {
                year: 2023,
                week: 53,
                max: 52
            })
        );
        assert!(matches!(
            start_date_from_iso_week(2023, 0),
            Err(WeekError::InvalidWeekNumber(_))
        ));
        assert!(matches!(
            start_date_from_iso_week(0, 1),
            Err(WeekError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            IsoWeek::parse("2024", "abc"),
            Err(WeekError::InvalidWeekNumber("abc".to_string()))
        );
        assert_eq!(
            IsoWeek::parse("twenty", "3"),
            Err(WeekError::InvalidYear("twenty".to_string()))
        );
        assert!(IsoWeek::parse("2024", "-3").is_err());
        assert!(IsoWeek::parse("2024", "").is_err());
        assert_eq!(IsoWeek::parse("2024", "7").unwrap().week(), 7);
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(date!(2024 - 01 - 05)), "2024-01-05");
        let early = Date::from_calendar_date(987, Month::November, 30).unwrap();
        assert_eq!(format_date(early), "0987-11-30");
    }

    #[test]
    fn test_dates_outside_supported_years_are_clamped() {
        let start = start_of_iso_week(Date::MIN);
        assert_eq!(start.date(), FIRST_DAY);
        assert_eq!(start.date().weekday(), Weekday::Monday);

        let week = iso_week_of(Date::MIN);
        assert_eq!((week.year(), week.week()), (MIN_YEAR, 1));
        assert_eq!(IsoWeek::new(week.year(), week.week().into()), Ok(week));

        let start = start_of_iso_week(Date::MAX);
        assert_eq!(start.date(), date!(9999 - 12 - 27));

        let week = iso_week_of(Date::MAX);
        assert_eq!((week.year(), week.week()), (MAX_YEAR, 52));
        assert_eq!(IsoWeek::new(week.year(), week.week().into()), Ok(week));
    }

    #[test]
    fn test_iso_week_display() {
        assert_eq!(IsoWeek::new(2024, 7).unwrap().to_string(), "2024-W07");
    }
}
