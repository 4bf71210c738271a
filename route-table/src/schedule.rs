//! Calendar-driven delivery priority.
//!
//! Alternating stops are split into two groups served on odd and even days
//! of the month. On the weekly off days neither group is served, so the two
//! groups carry no relative priority. Daily stops always lead and inactive
//! stops always trail.

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::domain::DeliveryAlt;

/// Parity of the day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayParity {
    Odd,
    Even,
}

impl DayParity {
    /// Parity of `date`'s day of the month.
    pub fn of(date: NaiveDate) -> Self {
        if date.day() % 2 == 1 {
            Self::Odd
        } else {
            Self::Even
        }
    }
}

/// Classification of a calendar date, computed once per pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleClass {
    pub parity: DayParity,

    /// True on the deployment's weekly off days.
    pub weekend_suppressed: bool,
}

/// Classify `date` given the weekly off days.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use route_table::schedule::{classify, DayParity};
///
/// // Friday 15 March 2024
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let class = classify(date, &[Weekday::Fri, Weekday::Sat]);
/// assert_eq!(class.parity, DayParity::Odd);
/// assert!(class.weekend_suppressed);
/// ```
pub fn classify(date: NaiveDate, off_days: &[Weekday]) -> ScheduleClass {
    ScheduleClass {
        parity: DayParity::of(date),
        weekend_suppressed: off_days.contains(&date.weekday()),
    }
}

/// Sort key for a row's alternation tag under `class`. Lower sorts first.
///
/// Alternating groups tie on off days so a stable sort keeps their input
/// order.
pub fn priority(alt: DeliveryAlt, class: ScheduleClass) -> u8 {
    match alt {
        DeliveryAlt::Daily => 0,
        DeliveryAlt::Inactive => 3,
        DeliveryAlt::Alt1 | DeliveryAlt::Alt2 if class.weekend_suppressed => 1,
        DeliveryAlt::Alt1 => match class.parity {
            DayParity::Odd => 1,
            DayParity::Even => 2,
        },
        DeliveryAlt::Alt2 => match class.parity {
            DayParity::Odd => 2,
            DayParity::Even => 1,
        },
    }
}

/// Source of the current date.
///
/// Injected so ordering can be reproduced for a fixed day.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
