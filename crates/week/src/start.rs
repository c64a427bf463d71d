use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, PrimitiveDateTime, Weekday, macros::format_description};

use crate::{IsoWeek, Result, WeekError, format_date, iso_week_of};

/// Canonical start date of an ISO week: always a Monday, rendered `YYYY-MM-DD`.
///
/// This is the join key against the `weeks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekStart(Date);

impl WeekStart {
    pub(crate) fn from_monday(date: Date) -> Self {
        debug_assert_eq!(date.weekday(), Weekday::Monday);
        Self(date)
    }

    pub fn date(&self) -> Date {
        self.0
    }

    /// The start of the week at 00:00.
    pub fn midnight(&self) -> PrimitiveDateTime {
        self.0.midnight()
    }

    pub fn iso_week(&self) -> IsoWeek {
        iso_week_of(self.0)
    }
}

impl TryFrom<Date> for WeekStart {
    type Error = WeekError;

    fn try_from(date: Date) -> Result<Self> {
        if date.weekday() != Weekday::Monday {
            return Err(WeekError::NotMonday(format_date(date)));
        }

        Ok(Self(date))
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self.0))
    }
}

impl FromStr for WeekStart {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self> {
        let date = Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map_err(|e| WeekError::InvalidDate(format!("{s}: {e}")))?;

        Self::try_from(date)
    }
}

impl Serialize for WeekStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekStart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
