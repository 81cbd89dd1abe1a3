use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::ReportResult;
use crate::commands::common::{month_labels, round_cents, window_hint};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{MonthlySpendRow, SpendingData};
use crate::panel::date::{month_axis, month_start};
use crate::records::{RecordShape, SpendRecord, build_window, load_spend_records};
use crate::setup::{ensure_readable, ensure_readable_at};
use crate::state::open_readonly_connection;

#[derive(Debug, Clone, Default)]
pub struct SpendingRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ReportResult<SuccessEnvelope> {
    run_with_options(SpendingRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SpendingRunOptions<'_>) -> ReportResult<SuccessEnvelope> {
    let window = build_window(options.from.as_deref(), options.to.as_deref(), "spending")?;
    let context = if let Some(home) = options.home_override {
        ensure_readable_at(home)?
    } else {
        ensure_readable()?
    };

    let connection = open_readonly_connection(&context.db_path)?;
    let records = load_spend_records(
        &connection,
        &context.db_path,
        context.config.spending_query(),
        &window,
        RecordShape::Household,
        "spending",
    )?;

    let months = project_monthly_totals(&records);
    let total = round_cents(months.iter().map(|row| row.total).sum());

    let data = SpendingData {
        window: window_hint(&window),
        data_range: context.data_range,
        months,
        total,
    };

    success("spending", data)
}

/// Dollars and item counts per month over the dense axis. Months without
/// purchases still get a row with zero dollars and zero items.
fn project_monthly_totals(records: &[SpendRecord]) -> Vec<MonthlySpendRow> {
    let Some(earliest) = records.iter().map(|record| record.posted_on).min() else {
        return Vec::new();
    };
    let Some(latest) = records.iter().map(|record| record.posted_on).max() else {
        return Vec::new();
    };

    let mut dollars: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut items: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in records {
        let bucket = month_start(record.posted_on);
        *dollars.entry(bucket).or_insert(0.0) += record.amount;
        *items.entry(bucket).or_insert(0) += 1;
    }

    let axis = month_axis(earliest, latest);
    let labels = month_labels(&axis);
    axis.iter()
        .zip(labels)
        .map(|(month, label)| MonthlySpendRow {
            month: label,
            total: round_cents(dollars.get(month).copied().unwrap_or(0.0)),
            items: items.get(month).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::records::SpendRecord;

    use super::project_monthly_totals;

    fn record(year: i32, month: u32, day: u32, amount: f64) -> SpendRecord {
        let posted_on = NaiveDate::from_ymd_opt(year, month, day);
        assert!(posted_on.is_some());
        SpendRecord {
            posted_on: posted_on.unwrap_or_default(),
            amount,
            member_id: None,
            category: None,
            discounted: false,
        }
    }

    #[test]
    fn quiet_months_get_zero_rows_not_gaps() {
        let rows = project_monthly_totals(&[
            record(2024, 1, 10, 20.0),
            record(2024, 1, 12, 5.0),
            record(2024, 3, 1, 1.5),
        ]);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].month, "2024-01");
        assert_eq!(rows[0].total, 25.0);
        assert_eq!(rows[0].items, 2);
        assert_eq!(rows[1].month, "2024-02");
        assert_eq!(rows[1].total, 0.0);
        assert_eq!(rows[1].items, 0);
        assert_eq!(rows[2].month, "2024-03");
        assert_eq!(rows[2].items, 1);
    }

    #[test]
    fn no_records_projects_no_rows() {
        assert!(project_monthly_totals(&[]).is_empty());
    }
}
