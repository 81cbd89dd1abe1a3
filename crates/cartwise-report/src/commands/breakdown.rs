use std::collections::BTreeMap;
use std::path::Path;

use crate::ReportResult;
use crate::commands::common::{round_cents, window_hint};
use crate::config::ReportConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{BreakdownBuckets, BreakdownData, MemberBreakdownRow};
use crate::records::{RecordShape, SpendRecord, build_window, load_spend_records};
use crate::setup::{ensure_readable, ensure_readable_at};
use crate::state::open_readonly_connection;

#[derive(Debug, Clone, Default)]
pub struct BreakdownRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ReportResult<SuccessEnvelope> {
    run_with_options(BreakdownRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BreakdownRunOptions<'_>) -> ReportResult<SuccessEnvelope> {
    let window = build_window(options.from.as_deref(), options.to.as_deref(), "breakdown")?;
    let context = if let Some(home) = options.home_override {
        ensure_readable_at(home)?
    } else {
        ensure_readable()?
    };

    let connection = open_readonly_connection(&context.db_path)?;
    let records = load_spend_records(
        &connection,
        &context.db_path,
        context.config.breakdown_query(),
        &window,
        RecordShape::Breakdown,
        "breakdown",
    )?;

    let data = BreakdownData {
        window: window_hint(&window),
        data_range: context.data_range,
        rows: project_rows(&records, &context.config),
    };

    success("breakdown", data)
}

#[derive(Debug, Clone, Copy, Default)]
struct BucketSums {
    food_full: f64,
    food_sale: f64,
    non_food_full: f64,
    non_food_sale: f64,
}

/// Per-member food/non-food × full-price/discounted pivot, one row per
/// member, ordered by id.
fn project_rows(records: &[SpendRecord], config: &ReportConfig) -> Vec<MemberBreakdownRow> {
    let mut sums: BTreeMap<i64, BucketSums> = BTreeMap::new();
    for record in records {
        let Some(member_id) = record.member_id else {
            continue;
        };

        let food = record
            .category
            .as_deref()
            .is_some_and(|category| config.is_food_category(category));
        let buckets = sums.entry(member_id).or_default();
        match (food, record.discounted) {
            (true, false) => buckets.food_full += record.amount,
            (true, true) => buckets.food_sale += record.amount,
            (false, false) => buckets.non_food_full += record.amount,
            (false, true) => buckets.non_food_sale += record.amount,
        }
    }

    sums.into_iter()
        .map(|(member_id, buckets)| {
            let total = buckets.food_full + buckets.food_sale
                + buckets.non_food_full
                + buckets.non_food_sale;

            MemberBreakdownRow {
                member_id,
                label: config.member_label(member_id),
                buckets: BreakdownBuckets {
                    food_full: round_cents(buckets.food_full),
                    food_sale: round_cents(buckets.food_sale),
                    non_food_full: round_cents(buckets.non_food_full),
                    non_food_sale: round_cents(buckets.non_food_sale),
                },
                total: round_cents(total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::config::ReportConfig;
    use crate::records::SpendRecord;

    use super::project_rows;

    fn record(amount: f64, member_id: i64, category: &str, discounted: bool) -> SpendRecord {
        let posted_on = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(posted_on.is_some());
        SpendRecord {
            posted_on: posted_on.unwrap_or_default(),
            amount,
            member_id: Some(member_id),
            category: Some(category.to_string()),
            discounted,
        }
    }

    #[test]
    fn amounts_land_in_the_right_pivot_bucket() {
        let config = ReportConfig::default();
        let rows = project_rows(
            &[
                record(10.0, 1, "Dairy", false),
                record(4.0, 1, "Dairy", true),
                record(20.0, 1, "Appliance", false),
                record(6.0, 1, "Clothing", true),
            ],
            &config,
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].buckets.food_full, 10.0);
        assert_eq!(rows[0].buckets.food_sale, 4.0);
        assert_eq!(rows[0].buckets.non_food_full, 20.0);
        assert_eq!(rows[0].buckets.non_food_sale, 6.0);
        assert_eq!(rows[0].total, 40.0);
    }

    #[test]
    fn unknown_categories_count_as_non_food() {
        let rows = project_rows(&[record(5.0, 2, "Tires", false)], &ReportConfig::default());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].buckets.non_food_full, 5.0);
        assert_eq!(rows[0].buckets.food_full, 0.0);
    }

    #[test]
    fn members_are_split_and_ordered_by_id() {
        let rows = project_rows(
            &[
                record(1.0, 3, "Dairy", false),
                record(2.0, 1, "Dairy", false),
            ],
            &ReportConfig::default(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].member_id, 1);
        assert_eq!(rows[1].member_id, 3);
    }
}
