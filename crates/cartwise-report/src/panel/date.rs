use chrono::{Datelike, NaiveDate};

use crate::{ReportError, ReportResult};

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Month labels are the canonical bucket keys, e.g. `2024-03`.
pub fn format_month(date: &NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ReportResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ReportError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ReportError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

/// Truncates any date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    if let Some(start) = NaiveDate::from_ymd_opt(date.year(), date.month(), 1) {
        return start;
    }
    date
}

/// Steps exactly one calendar month, never a fixed number of days.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    let (year, month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };

    if let Some(next) = NaiveDate::from_ymd_opt(year, month, 1) {
        return next;
    }
    start
}

/// The inclusive ordered month-start sequence covering `[earliest, latest]`.
pub fn month_axis(earliest: NaiveDate, latest: NaiveDate) -> Vec<NaiveDate> {
    let end = month_start(latest);
    let mut cursor = month_start(earliest);

    let mut axis = Vec::new();
    while cursor <= end {
        axis.push(cursor);
        cursor = next_month_start(cursor);
    }
    axis
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
