use chrono::NaiveDate;

use crate::domain::errors::NextDateError;
use crate::domain::value_objects::repeat_rule::RepeatRule;
use crate::domain::value_objects::task_date::{format_task_date, parse_task_date};

/// Computes the next due date of a repeating task.
///
/// `start` is the task's current `YYYYMMDD` date and `repeat` its rule. The rule is
/// applied at least once and then rolled forward until the result is on or after
/// `now`, so the returned date may equal `now` but is never before it.
///
/// An empty `repeat` is not "no repetition" here; callers handle that before calling.
pub fn next_date(now: NaiveDate, start: &str, repeat: &str) -> Result<String, NextDateError> {
    let start_date =
        parse_task_date(start).ok_or_else(|| NextDateError::InvalidDateFormat(start.to_string()))?;
    let rule = RepeatRule::parse(repeat)?;

    let next = rule
        .next_on_or_after(start_date, now)
        .ok_or_else(|| NextDateError::InvalidRepeatRule(repeat.to_string()))?;

    Ok(format_task_date(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_task_date(s).unwrap()
    }

    #[test]
    fn daily_rule_may_land_on_now() {
        assert_eq!(next_date(day("20240115"), "20240101", "d 7").unwrap(), "20240115");
    }

    #[test]
    fn yearly_rule_always_advances_at_least_once() {
        assert_eq!(next_date(day("20240101"), "20240101", "y 1").unwrap(), "20250101");
    }

    #[test]
    fn monthly_rule_from_month_end() {
        assert_eq!(next_date(day("20240301"), "20240131", "m 1").unwrap(), "20240329");
        assert_eq!(next_date(day("20240201"), "20240131", "m 1").unwrap(), "20240229");
    }

    #[test]
    fn yearly_rule_from_leap_day_stays_clamped() {
        assert_eq!(next_date(day("20280101"), "20240229", "y 1").unwrap(), "20280228");
    }

    #[test]
    fn weekly_rule_rolls_in_fourteen_day_steps() {
        assert_eq!(next_date(day("20240101"), "20231225", "w 2").unwrap(), "20240108");
        assert_eq!(next_date(day("20240109"), "20231225", "w 2").unwrap(), "20240122");
    }

    #[test]
    fn weekly_matches_equivalent_daily_rule() {
        let now = day("20240610");
        for start in ["20200101", "20240229", "20240610", "20300101"] {
            assert_eq!(next_date(now, start, "w 3"), next_date(now, start, "d 21"));
        }
    }

    #[test]
    fn start_in_the_future_advances_once() {
        assert_eq!(next_date(day("20240101"), "20240301", "d 1").unwrap(), "20240302");
    }

    #[test]
    fn bare_keywords_step_by_one_unit() {
        let now = day("20240101");
        assert_eq!(next_date(now, "20240101", "daily").unwrap(), "20240102");
        assert_eq!(next_date(now, "20240101", "weekly").unwrap(), "20240108");
        assert_eq!(next_date(now, "20240101", "monthly").unwrap(), "20240201");
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_eq!(
            next_date(day("20240101"), "20240101", "d 0"),
            Err(NextDateError::InvalidRepeatRule("d 0".to_string()))
        );
    }

    #[test]
    fn invalid_rules_never_default() {
        let now = day("20240101");
        for rule in ["", "x 3", "d 0", "d -1", "d"] {
            let err = next_date(now, "20240101", rule).unwrap_err();
            assert!(
                matches!(
                    err,
                    NextDateError::InvalidRepeatRule(_) | NextDateError::UnsupportedUnit(_)
                ),
                "{rule:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn malformed_start_is_rejected() {
        let now = day("20240101");
        for start in ["2024-01-01", "20241301"] {
            assert_eq!(
                next_date(now, start, "d 1"),
                Err(NextDateError::InvalidDateFormat(start.to_string()))
            );
        }
    }

    #[test]
    fn start_is_checked_before_rule() {
        assert!(matches!(
            next_date(day("20240101"), "bad", "x 1"),
            Err(NextDateError::InvalidDateFormat(_))
        ));
    }
}
