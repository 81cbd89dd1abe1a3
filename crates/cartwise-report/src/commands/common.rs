use chrono::NaiveDate;

use crate::contracts::types::WindowHint;
use crate::panel::date::{format_iso_date, format_month};
use crate::records::ReportWindow;

pub(crate) fn window_hint(window: &ReportWindow) -> WindowHint {
    WindowHint {
        from: window.from.as_ref().map(format_iso_date),
        to: window.to.as_ref().map(format_iso_date),
    }
}

pub(crate) fn month_labels(months: &[NaiveDate]) -> Vec<String> {
    months.iter().map(format_month).collect()
}

/// Payload amounts are currency; two decimal places everywhere.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
