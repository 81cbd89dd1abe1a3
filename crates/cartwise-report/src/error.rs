use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ReportError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ReportError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `cartwise {cmd} --help` for usage."),
            None => "Run `cartwise --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Config file at `{location}` could not be used: {detail}"),
            vec![
                format!("Fix or delete `{location}`; cartwise falls back to defaults without it."),
                "Run `cartwise config show` to inspect the resolved configuration.".to_string(),
            ],
        )
    }

    pub fn db_missing(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_missing",
            &format!("No purchase database found at `{location}`."),
            vec![
                "Set `CARTWISE_DB` to the path of your purchases SQLite file.".to_string(),
                "Or set `database_path` in the cartwise config file.".to_string(),
                "Run `cartwise config show` to see where cartwise looks.".to_string(),
            ],
        )
    }

    pub fn db_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_locked",
            &format!("Purchase database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn db_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_corrupt",
            &format!("Purchase database appears corrupt at `{location}`."),
            vec![format!(
                "Point cartwise at a valid SQLite purchases file instead of `{location}`."
            )],
        )
    }

    pub fn db_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_permission_denied",
            &format!("Cannot read the purchase database at `{location}`: {detail}"),
            vec![format!("Grant read access to `{location}` and retry.")],
        )
    }

    pub fn db_open_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_open_failed",
            &format!("Could not open the purchase database at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn db_schema_mismatch(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "db_schema_mismatch",
            &format!("Purchase database at `{location}` is missing expected objects: {detail}"),
            vec![
                "Point cartwise at a database with a `transactions` table containing \
                 `transaction_date`, `sold_price`, and `member_id` columns."
                    .to_string(),
            ],
        )
    }

    pub fn query_shape_mismatch(report: &str, missing_column: &str, available: &[String]) -> Self {
        Self::new(
            "query_shape_mismatch",
            &format!("The `{report}` query does not expose a `{missing_column}` column."),
            vec![
                format!("Alias the needed column in your configured `{report}` query."),
                "Remove the query override to fall back to the built-in query.".to_string(),
            ],
        )
        .with_data(json!({
            "report": report,
            "missing_column": missing_column,
            "available_columns": available,
        }))
    }

    pub fn query_failed(report: &str, detail: &str) -> Self {
        Self::new(
            "query_failed",
            &format!("The `{report}` query could not be executed: {detail}"),
            vec![
                format!("Check the configured `{report}` query against your database schema."),
                "Run `cartwise config show` to inspect the resolved configuration.".to_string(),
            ],
        )
    }

    pub fn malformed_date(report: &str, row_index: usize, raw: &str) -> Self {
        Self::new(
            "malformed_date",
            &format!(
                "Row {row_index} of the `{report}` query has an unreadable date `{raw}`; \
                 the report was aborted rather than undercounted."
            ),
            vec![
                "Fix the offending row so `posted_on` is a `YYYY-MM-DD` date.".to_string(),
                "Or exclude it with a WHERE clause in the configured query.".to_string(),
            ],
        )
        .with_data(json!({
            "report": report,
            "row_index": row_index,
            "raw_value": raw,
        }))
    }

    pub fn non_numeric_amount(report: &str, row_index: usize, raw: &str) -> Self {
        Self::new(
            "non_numeric_amount",
            &format!(
                "Row {row_index} of the `{report}` query has a non-numeric amount `{raw}`; \
                 the report was aborted rather than undercounted."
            ),
            vec![
                "Fix the offending row so `amount` is a number.".to_string(),
                "Or exclude it with a WHERE clause in the configured query.".to_string(),
            ],
        )
        .with_data(json!({
            "report": report,
            "row_index": row_index,
            "raw_value": raw,
        }))
    }

    pub fn missing_member_id(report: &str, row_index: usize) -> Self {
        Self::new(
            "missing_member_id",
            &format!(
                "Row {row_index} of the `{report}` query has no usable `member_id`; \
                 the report was aborted rather than undercounted."
            ),
            vec![
                "Fix the offending row so `member_id` is an integer.".to_string(),
                "Or exclude memberless rows with a WHERE clause in the configured query."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "report": report,
            "row_index": row_index,
        }))
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
