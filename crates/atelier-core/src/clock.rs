//! # Clock
//!
//! Injectable source of "now". Issue dates and export file names both read
//! the current date, so everything that needs it takes a `&dyn Clock` (or a
//! generic `C: Clock`) instead of calling the system time directly.
//!
//! ```rust
//! use atelier_core::clock::{Clock, FixedClock};
//!
//! let clock = FixedClock::ymd(2025, 9, 16);
//! assert_eq!(clock.today().to_string(), "2025-09-16");
//! ```

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current local date-time.
    fn now(&self) -> NaiveDateTime;

    /// Current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant, for deterministic builds and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        FixedClock(at)
    }

    /// Midnight of the given calendar day.
    ///
    /// Out-of-range components clamp to 1970-01-01 rather than panic.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
        FixedClock(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
