use std::path::Path;

use crate::ReportResult;
use crate::commands::common::{month_labels, round_cents, window_hint};
use crate::config::ReportConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{MemberPanelData, MemberSeries};
use crate::panel::builder::build_member_panel;
use crate::panel::types::MonthlyPanel;
use crate::records::{RecordShape, build_window, load_spend_records};
use crate::setup::{ensure_readable, ensure_readable_at};
use crate::state::open_readonly_connection;

#[derive(Debug, Clone, Default)]
pub struct MembersRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ReportResult<SuccessEnvelope> {
    run_with_options(MembersRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: MembersRunOptions<'_>) -> ReportResult<SuccessEnvelope> {
    let window = build_window(options.from.as_deref(), options.to.as_deref(), "members")?;
    let context = if let Some(home) = options.home_override {
        ensure_readable_at(home)?
    } else {
        ensure_readable()?
    };

    let connection = open_readonly_connection(&context.db_path)?;
    let records = load_spend_records(
        &connection,
        &context.db_path,
        context.config.members_query(),
        &window,
        RecordShape::Member,
        "members",
    )?;

    let panel = build_member_panel(&records)?;
    let data = MemberPanelData {
        window: window_hint(&window),
        data_range: context.data_range,
        months: month_labels(panel.months()),
        series: project_series(&panel, &context.config),
    };

    success("members", data)
}

/// The "one column per member" projection. Member order is first-observed;
/// the display label comes from the member directory at render time only.
fn project_series(panel: &MonthlyPanel, config: &ReportConfig) -> Vec<MemberSeries> {
    panel
        .members()
        .iter()
        .map(|member_id| {
            let values = panel
                .member_series(*member_id)
                .into_iter()
                .map(round_cents)
                .collect::<Vec<f64>>();
            let total = round_cents(panel.member_total(*member_id));

            MemberSeries {
                member_id: *member_id,
                label: config.member_label(*member_id),
                values,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::config::{MemberLabel, ReportConfig};
    use crate::panel::builder::build_member_panel;
    use crate::records::SpendRecord;

    use super::project_series;

    fn record(year: i32, month: u32, day: u32, amount: f64, member_id: i64) -> SpendRecord {
        let posted_on = NaiveDate::from_ymd_opt(year, month, day);
        assert!(posted_on.is_some());
        SpendRecord {
            posted_on: posted_on.unwrap_or_default(),
            amount,
            member_id: Some(member_id),
            category: None,
            discounted: false,
        }
    }

    #[test]
    fn series_values_align_with_the_shared_month_axis() {
        let panel = build_member_panel(&[
            record(2024, 1, 15, 10.0, 1),
            record(2024, 3, 2, 5.0, 2),
        ]);
        assert!(panel.is_ok());
        if let Ok(built) = panel {
            let config = ReportConfig {
                members: vec![MemberLabel {
                    id: 1,
                    label: "BF".to_string(),
                }],
                ..ReportConfig::default()
            };

            let series = project_series(&built, &config);
            assert_eq!(series.len(), 2);
            assert_eq!(series[0].label, "BF");
            assert_eq!(series[0].values, vec![10.0, 0.0, 0.0]);
            assert_eq!(series[1].label, "Member 2");
            assert_eq!(series[1].values, vec![0.0, 0.0, 5.0]);
            assert_eq!(series[1].total, 5.0);
        }
    }
}
