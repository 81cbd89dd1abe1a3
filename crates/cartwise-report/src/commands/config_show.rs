use std::path::Path;

use crate::ReportResult;
use crate::config::{ReportConfig, config_path};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ConfigShowData, MemberDirectoryRow};
use crate::setup::read_data_range;
use crate::state::{open_readonly_connection, resolve_report_home};

pub fn run() -> ReportResult<SuccessEnvelope> {
    run_with_home_override(None)
}

/// Unlike the report commands, orientation tolerates a missing database:
/// first-run users need to see where cartwise is looking.
#[doc(hidden)]
pub fn run_with_home_override(home_override: Option<&Path>) -> ReportResult<SuccessEnvelope> {
    let home = resolve_report_home(home_override)?;
    let config = ReportConfig::load(&home)?;
    let config_file = config_path(&home);
    let db_path = config.resolve_database_path(&home);

    let db_present = db_path.exists();
    let data_range = if db_present {
        let connection = open_readonly_connection(&db_path)?;
        Some(read_data_range(&connection, &db_path)?)
    } else {
        None
    };

    let data = ConfigShowData {
        home: home.display().to_string(),
        config_path: config_file.display().to_string(),
        config_file_present: config_file.exists(),
        db_path: db_path.display().to_string(),
        db_present,
        members: config
            .members
            .iter()
            .map(|entry| MemberDirectoryRow {
                id: entry.id,
                label: entry.label.clone(),
            })
            .collect(),
        food_categories: config.food_categories.clone(),
        non_food_categories: config.non_food_categories.clone(),
        data_range,
    };

    success("config show", data)
}
