//! The source of the current date.
//!
//! Default periods ("this month") are resolved against a [Clock] held in the
//! app state so that handlers can be tested against a fixed date.

use std::fmt::Debug;

use time::{Date, OffsetDateTime};

use crate::{Error, timezone::get_local_offset};

/// Provides today's date in the server's local timezone.
pub trait Clock: Debug + Send + Sync {
    /// Today's date.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the local timezone cannot be
    /// resolved.
    fn today(&self) -> Result<Date, Error>;
}

/// A [Clock] that reads the system time and converts it to a local timezone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    local_timezone: String,
}

impl SystemClock {
    /// Create a clock for the canonical timezone name `local_timezone`.
    pub fn new(local_timezone: &str) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Result<Date, Error> {
        let local_offset = get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })?;

        Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }
}

/// A [Clock] that is stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Result<Date, Error> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Clock, Error, FixedClock, SystemClock};

    #[test]
    fn fixed_clock_returns_its_date() {
        let clock = FixedClock(date!(2024 - 03 - 05));

        assert_eq!(clock.today(), Ok(date!(2024 - 03 - 05)));
    }

    #[test]
    fn system_clock_accepts_canonical_timezone() {
        let clock = SystemClock::new("Etc/UTC");

        assert!(clock.today().is_ok());
    }

    #[test]
    fn system_clock_rejects_unknown_timezone() {
        let clock = SystemClock::new("Middle/Earth");

        assert_eq!(
            clock.today(),
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
