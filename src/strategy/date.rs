use std::fmt;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::Result;
use crate::options::ReleaseOptions;
use crate::strategy::TagStrategy;

/// Source of the current date
pub trait Clock {
    /// Today's date in UTC
    fn today(&self) -> NaiveDate;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Date tags: `v<YY>.<MM>.<DD>`, with `.1`, `.2`, ... appended for further
/// releases on the same day.
pub struct DateStrategy {
    clock: Box<dyn Clock>,
}

impl DateStrategy {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        DateStrategy {
            clock: Box::new(clock),
        }
    }

    /// Tag for a date before collision handling (2019-10-10 -> `v19.10.10`)
    pub fn base_tag(date: NaiveDate) -> String {
        format!("v{}", date.format("%y.%m.%d"))
    }

    /// First unused tag for `date` among `tags`
    pub fn next_for_date(date: NaiveDate, tags: &[String]) -> String {
        let base = Self::base_tag(date);
        let taken = |candidate: &str| tags.iter().any(|tag| tag == candidate);

        if !taken(&base) {
            return base;
        }

        let mut n = 1u32;
        loop {
            let candidate = format!("{}.{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for DateStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateStrategy")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl TagStrategy for DateStrategy {
    fn name(&self) -> &str {
        "date"
    }

    fn next_tag(&self, tags: &[String], _options: &ReleaseOptions) -> Result<String> {
        let today = self.clock.today();
        let tag = Self::next_for_date(today, tags);
        debug!(%today, %tag, "computed next date tag");
        Ok(tag)
    }
}
