//! ISO-8601 week arithmetic.
//!
//! A week is identified either by its [`IsoWeek`] key (week-year and number) or by the
//! [`WeekStart`] date of its Monday, which is what the schedule store is keyed on.

mod clock;
mod error;
mod iso;
mod start;

pub use clock::*;
pub use error::*;
pub use iso::*;
pub use start::*;
