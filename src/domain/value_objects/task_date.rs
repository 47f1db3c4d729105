use chrono::{Local, NaiveDate};

/// Wire and storage format of task dates (`YYYYMMDD`)
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Date format accepted by the task search box (`DD.MM.YYYY`)
pub const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a `YYYYMMDD` string; anything other than exactly eight digits forming a real calendar day is rejected
pub fn parse_task_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_task_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses the `DD.MM.YYYY` form users type into the search box
pub fn parse_search_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), SEARCH_DATE_FORMAT).ok()
}

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
