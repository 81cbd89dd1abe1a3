use std::path::Path;

use crate::ReportResult;
use crate::commands::common::{month_labels, round_cents, window_hint};
use crate::config::ReportConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryPanelData, CategorySeries};
use crate::panel::builder::build_category_panel;
use crate::panel::types::CategoryPanel;
use crate::records::{RecordShape, build_window, load_spend_records};
use crate::setup::{ensure_readable, ensure_readable_at};
use crate::state::open_readonly_connection;

#[derive(Debug, Clone, Default)]
pub struct CategoriesRunOptions<'a> {
    pub from: Option<String>,
    pub to: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(from: Option<&str>, to: Option<&str>) -> ReportResult<SuccessEnvelope> {
    run_with_options(CategoriesRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CategoriesRunOptions<'_>) -> ReportResult<SuccessEnvelope> {
    let window = build_window(options.from.as_deref(), options.to.as_deref(), "categories")?;
    let context = if let Some(home) = options.home_override {
        ensure_readable_at(home)?
    } else {
        ensure_readable()?
    };

    let connection = open_readonly_connection(&context.db_path)?;
    let records = load_spend_records(
        &connection,
        &context.db_path,
        context.config.categories_query(),
        &window,
        RecordShape::Category,
        "categories",
    )?;

    let panel = build_category_panel(&records)?;
    let data = CategoryPanelData {
        window: window_hint(&window),
        data_range: context.data_range,
        months: month_labels(panel.months()),
        series: project_series(&panel, &context.config),
    };

    success("categories", data)
}

/// Series are sorted by member then category for stable chart legends;
/// categories a member never bought do not appear.
fn project_series(panel: &CategoryPanel, config: &ReportConfig) -> Vec<CategorySeries> {
    let mut series = panel
        .groups()
        .iter()
        .map(|(member_id, category)| {
            let values = panel
                .group_series(*member_id, category)
                .into_iter()
                .map(round_cents)
                .collect::<Vec<f64>>();
            let total = round_cents(panel.group_total(*member_id, category));

            CategorySeries {
                member_id: *member_id,
                label: config.member_label(*member_id),
                category: category.clone(),
                values,
                total,
            }
        })
        .collect::<Vec<CategorySeries>>();

    series.sort_by(|left, right| {
        left.member_id
            .cmp(&right.member_id)
            .then_with(|| left.category.cmp(&right.category))
    });

    series
}
