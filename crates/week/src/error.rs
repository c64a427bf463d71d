use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekError {
    #[error("invalid year: {0:?}")]
    InvalidYear(String),

    #[error("invalid week number: {0:?}")]
    InvalidWeekNumber(String),

    #[error("week {week} is out of range for {year} (1..={max})")]
    WeekOutOfRange { year: i32, week: u32, max: u8 },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("{0} is not a Monday")]
    NotMonday(String),
}

pub type Result<T, E = WeekError> = std::result::Result<T, E>;
