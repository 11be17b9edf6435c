//! Calendar decomposition and the solar-system's simulated clock

use time::{Date, Month, OffsetDateTime};

/// Seconds in one simulated day.
pub const SECS_PER_DAY: i64 = 86_400;

/// Broken-down UTC time, as shown by the clock page and fed to the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl CalendarTime {
    /// Decompose a Unix epoch. Returns `None` outside the representable range.
    pub fn from_epoch(epoch: i64) -> Option<Self> {
        let datetime = OffsetDateTime::from_unix_timestamp(epoch).ok()?;
        Some(Self {
            year: datetime.year(),
            month: u8::from(datetime.month()),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
        })
    }

    /// Fractional days since the J2000.0 epoch (2000-01-01 12:00 UTC).
    ///
    /// Returns `None` if the fields do not form a valid Gregorian date.
    pub fn days_since_j2000(&self) -> Option<f64> {
        let month = Month::try_from(self.month).ok()?;
        let date = Date::from_calendar_date(self.year, month, self.day).ok()?;
        let days = date.to_julian_day() - J2000_JULIAN_DAY;
        Some(days as f64 - 0.5 + (self.hour as f64 * 60.0 + self.minute as f64) / 1440.0)
    }
}

/// Julian day number of 2000-01-01.
const J2000_JULIAN_DAY: i32 = 2_451_545;

/// The forward offset wraps after this many days: 19 whole 400-year
/// Gregorian cycles, so any boot date up to year 2399 stays inside the
/// calendar's year-9999 limit.
pub const SIM_WRAP_DAYS: i64 = 19 * 146_097;

/// Wall-clock start epoch plus a whole-day forward offset.
///
/// Lets the solar system animate faster than real time without touching the
/// real clock. The offset wraps every [`SIM_WRAP_DAYS`] so an always-on
/// device never runs off the end of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    start_epoch: i64,
    forward_secs: i64,
}

impl SimulatedClock {
    pub const fn new(start_epoch: i64) -> Self {
        Self {
            start_epoch,
            forward_secs: 0,
        }
    }

    /// Advance by `secs` simulated seconds.
    pub fn advance(&mut self, secs: i64) {
        self.forward_secs = self
            .forward_secs
            .saturating_add(secs)
            .rem_euclid(SIM_WRAP_DAYS * SECS_PER_DAY);
    }

    pub fn epoch(&self) -> i64 {
        self.start_epoch.saturating_add(self.forward_secs)
    }

    pub fn forward_days(&self) -> i64 {
        self.forward_secs / SECS_PER_DAY
    }

    pub fn calendar(&self) -> Option<CalendarTime> {
        CalendarTime::from_epoch(self.epoch())
    }
}
