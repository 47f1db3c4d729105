use thiserror::Error;

/// Reasons a (date, repeat rule) pair cannot produce a next occurrence.
/// All of them are permanent rejections of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NextDateError {
    #[error("invalid date format {0:?}, expected YYYYMMDD")]
    InvalidDateFormat(String),
    #[error("invalid repeat rule {0:?}")]
    InvalidRepeatRule(String),
    #[error("unsupported repeat unit {0:?}")]
    UnsupportedUnit(String),
}
