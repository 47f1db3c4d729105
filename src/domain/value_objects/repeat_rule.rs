use chrono::{Days, Months, NaiveDate};
use std::fmt;

use crate::domain::errors::NextDateError;

/// Recurrence of a task: a calendar unit and how many of them to step each time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatRule {
    Daily(u32),
    Weekly(u32),
    Monthly(u32),
    Yearly(u32),
}

impl RepeatRule {
    /// Parses `"<unit> <interval>"` (unit one of `d`, `w`, `m`, `y`) or one of the
    /// bare keywords `daily`, `weekly`, `monthly`
    pub fn parse(input: &str) -> Result<Self, NextDateError> {
        let invalid = || NextDateError::InvalidRepeatRule(input.to_string());

        let mut parts = input.split_whitespace();
        let unit = parts.next().ok_or_else(invalid)?;
        let interval = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        match (unit, interval) {
            ("daily", None) => return Ok(Self::Daily(1)),
            ("weekly", None) => return Ok(Self::Weekly(1)),
            ("monthly", None) => return Ok(Self::Monthly(1)),
            ("daily" | "weekly" | "monthly", Some(_)) => return Err(invalid()),
            _ => {}
        }

        let variant: fn(u32) -> Self = match unit {
            "d" => Self::Daily,
            "w" => Self::Weekly,
            "m" => Self::Monthly,
            "y" => Self::Yearly,
            other => return Err(NextDateError::UnsupportedUnit(other.to_string())),
        };

        let interval: u32 = interval
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        if interval == 0 {
            return Err(invalid());
        }

        Ok(variant(interval))
    }

    /// One step of the rule from `date`. Month and year steps clamp the day to the
    /// end of shorter months (Jan 31 + 1 month is Feb 29 in 2024).
    /// Returns `None` when the result leaves chrono's representable range.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Daily(n) => date.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly(n) => date.checked_add_days(Days::new(u64::from(n).checked_mul(7)?)),
            Self::Monthly(n) => date.checked_add_months(Months::new(n)),
            Self::Yearly(n) => date.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }

    /// Steps once from `start`, then keeps stepping from the previous result until
    /// the candidate falls on or after `now`.
    pub fn next_on_or_after(&self, start: NaiveDate, now: NaiveDate) -> Option<NaiveDate> {
        let mut candidate = self.advance(start)?;
        while candidate < now {
            candidate = self.advance(candidate)?;
        }
        Some(candidate)
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily(n) => write!(f, "d {}", n),
            Self::Weekly(n) => write!(f, "w {}", n),
            Self::Monthly(n) => write!(f, "m {}", n),
            Self::Yearly(n) => write!(f, "y {}", n),
        }
    }
}
