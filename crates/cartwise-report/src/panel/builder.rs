use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::panel::date::{month_axis, month_start};
use crate::panel::types::{CategoryPanel, MonthlyPanel};
use crate::records::SpendRecord;
use crate::{ReportError, ReportResult};

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Builds the dense per-member monthly panel. Input order does not matter;
/// the month axis covers every month between the earliest and latest record,
/// and every observed member gets an explicit zero entry for months without
/// purchases.
pub fn build_member_panel(records: &[SpendRecord]) -> ReportResult<MonthlyPanel> {
    let Some((earliest, latest)) = observed_date_range(records) else {
        return Ok(MonthlyPanel::empty());
    };

    let months = month_axis(earliest, latest);

    let mut members: Vec<i64> = Vec::new();
    let mut sums: BTreeMap<(NaiveDate, i64), f64> = BTreeMap::new();
    for (row_index, record) in records.iter().enumerate() {
        let member_id = require_member(record, row_index)?;
        if !members.contains(&member_id) {
            members.push(member_id);
        }

        let bucket = month_start(record.posted_on);
        *sums.entry((bucket, member_id)).or_insert(0.0) += record.amount;
    }

    let mut cells: BTreeMap<(NaiveDate, i64), f64> = BTreeMap::new();
    for month in &months {
        for member_id in &members {
            let amount = sums.get(&(*month, *member_id)).copied().unwrap_or(0.0);
            cells.insert((*month, *member_id), amount);
        }
    }

    Ok(MonthlyPanel::new(months, members, cells))
}

/// The (member, category) generalization. Zero-fill still runs over the full
/// month axis for every observed pair, but no categories are invented for
/// members that never bought them.
pub fn build_category_panel(records: &[SpendRecord]) -> ReportResult<CategoryPanel> {
    let Some((earliest, latest)) = observed_date_range(records) else {
        return Ok(CategoryPanel::empty());
    };

    let months = month_axis(earliest, latest);

    let mut groups: Vec<(i64, String)> = Vec::new();
    let mut sums: BTreeMap<(NaiveDate, i64, String), f64> = BTreeMap::new();
    for (row_index, record) in records.iter().enumerate() {
        let member_id = require_member(record, row_index)?;
        let category = record
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());

        let group = (member_id, category.clone());
        if !groups.contains(&group) {
            groups.push(group);
        }

        let bucket = month_start(record.posted_on);
        *sums.entry((bucket, member_id, category)).or_insert(0.0) += record.amount;
    }

    let mut cells: BTreeMap<(NaiveDate, i64, String), f64> = BTreeMap::new();
    for month in &months {
        for (member_id, category) in &groups {
            let key = (*month, *member_id, category.clone());
            let amount = sums.get(&key).copied().unwrap_or(0.0);
            cells.insert(key, amount);
        }
    }

    Ok(CategoryPanel::new(months, groups, cells))
}

fn observed_date_range(records: &[SpendRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for record in records {
        range = Some(match range {
            None => (record.posted_on, record.posted_on),
            Some((earliest, latest)) => (
                earliest.min(record.posted_on),
                latest.max(record.posted_on),
            ),
        });
    }
    range
}

fn require_member(record: &SpendRecord, row_index: usize) -> ReportResult<i64> {
    record
        .member_id
        .ok_or_else(|| ReportError::missing_member_id("panel", row_index))
}
