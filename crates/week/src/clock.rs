use time::{Date, OffsetDateTime};

/// Source of "today" for resolving the current week.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock in the local time zone.
///
/// Falls back to UTC when the local offset cannot be determined, which happens on some
/// platforms once the process is multi-threaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> Date {
        match OffsetDateTime::now_local() {
            Ok(now) => now.date(),
            Err(e) => {
                tracing::warn!(error = %e, "Local offset unavailable, using UTC date");
                OffsetDateTime::now_utc().date()
            }
        }
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
