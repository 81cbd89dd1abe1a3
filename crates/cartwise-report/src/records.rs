use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Error as SqliteError, Statement, ffi::ErrorCode, params};

use crate::panel::date::{format_iso_date, parse_iso_date_strict, parse_record_date};
use crate::state::map_sqlite_error;
use crate::{ReportError, ReportResult};

/// Inclusive date bounds applied to every report query as `?1`/`?2`.
#[derive(Debug, Clone, Default)]
pub struct ReportWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn build_window(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> ReportResult<ReportWindow> {
    let parsed_from = match from {
        Some(value) => Some(parse_iso_date_strict(value, "from", command)?),
        None => None,
    };
    let parsed_to = match to {
        Some(value) => Some(parse_iso_date_strict(value, "to", command)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ReportError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(ReportWindow {
        from: parsed_from,
        to: parsed_to,
    })
}

/// Which named columns a report's query must expose beyond
/// `posted_on`/`amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Household,
    Member,
    Category,
    Breakdown,
}

impl RecordShape {
    fn needs_member(self) -> bool {
        !matches!(self, Self::Household)
    }

    fn needs_category(self) -> bool {
        matches!(self, Self::Category | Self::Breakdown)
    }

    fn needs_discounted(self) -> bool {
        matches!(self, Self::Breakdown)
    }
}

#[derive(Debug, Clone)]
pub struct SpendRecord {
    pub posted_on: NaiveDate,
    pub amount: f64,
    pub member_id: Option<i64>,
    pub category: Option<String>,
    pub discounted: bool,
}

struct ColumnMap {
    posted_on: usize,
    amount: usize,
    member_id: Option<usize>,
    category: Option<usize>,
    discounted: Option<usize>,
}

/// Runs a configured report query and maps rows by column name. Unreadable
/// dates, amounts, and member ids abort the load with row context; rows are
/// never silently skipped.
pub fn load_spend_records(
    connection: &Connection,
    db_path: &Path,
    sql: &str,
    window: &ReportWindow,
    shape: RecordShape,
    report: &str,
) -> ReportResult<Vec<SpendRecord>> {
    let mut statement = connection
        .prepare(sql)
        .map_err(|error| map_query_error(db_path, report, &error))?;

    if !statement.readonly() {
        return Err(ReportError::invalid_argument_with_recovery(
            &format!("The `{report}` query must be read-only."),
            vec![
                "Use a SELECT-only query in the cartwise config.".to_string(),
                "Remove the query override to fall back to the built-in query.".to_string(),
            ],
        ));
    }

    let columns = resolve_columns(&statement, shape, report)?;

    let from_bound = window.from.as_ref().map(format_iso_date);
    let to_bound = window.to.as_ref().map(format_iso_date);

    let mut rows_cursor = statement
        .query(params![from_bound, to_bound])
        .map_err(|error| map_query_error(db_path, report, &error))?;

    let mut records: Vec<SpendRecord> = Vec::new();
    let mut row_index = 0usize;
    while let Some(row) = rows_cursor
        .next()
        .map_err(|error| map_query_error(db_path, report, &error))?
    {
        let posted_on_ref = row
            .get_ref(columns.posted_on)
            .map_err(|error| map_query_error(db_path, report, &error))?;
        let posted_on = extract_date(posted_on_ref, report, row_index)?;

        let amount_ref = row
            .get_ref(columns.amount)
            .map_err(|error| map_query_error(db_path, report, &error))?;
        let amount = extract_amount(amount_ref, report, row_index)?;

        let member_id = match columns.member_id {
            Some(index) => {
                let member_ref = row
                    .get_ref(index)
                    .map_err(|error| map_query_error(db_path, report, &error))?;
                Some(extract_member_id(member_ref, report, row_index)?)
            }
            None => None,
        };

        let category = match columns.category {
            Some(index) => {
                let category_ref = row
                    .get_ref(index)
                    .map_err(|error| map_query_error(db_path, report, &error))?;
                extract_category(category_ref)
            }
            None => None,
        };

        let discounted = match columns.discounted {
            Some(index) => {
                let discounted_ref = row
                    .get_ref(index)
                    .map_err(|error| map_query_error(db_path, report, &error))?;
                matches!(discounted_ref, ValueRef::Integer(value) if value != 0)
            }
            None => false,
        };

        records.push(SpendRecord {
            posted_on,
            amount,
            member_id,
            category,
            discounted,
        });
        row_index += 1;
    }

    Ok(records)
}

fn resolve_columns(
    statement: &Statement<'_>,
    shape: RecordShape,
    report: &str,
) -> ReportResult<ColumnMap> {
    let names = statement
        .column_names()
        .into_iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<String>>();

    let find = |wanted: &str| names.iter().position(|name| name == wanted);
    let require = |wanted: &str| {
        find(wanted).ok_or_else(|| ReportError::query_shape_mismatch(report, wanted, &names))
    };

    Ok(ColumnMap {
        posted_on: require("posted_on")?,
        amount: require("amount")?,
        member_id: if shape.needs_member() {
            Some(require("member_id")?)
        } else {
            None
        },
        category: if shape.needs_category() {
            Some(require("category")?)
        } else {
            None
        },
        discounted: if shape.needs_discounted() {
            Some(require("discounted")?)
        } else {
            None
        },
    })
}

fn extract_date(value: ValueRef<'_>, report: &str, row_index: usize) -> ReportResult<NaiveDate> {
    let ValueRef::Text(bytes) = value else {
        return Err(ReportError::malformed_date(
            report,
            row_index,
            &describe_value(value),
        ));
    };

    let text = String::from_utf8_lossy(bytes);
    parse_record_date(&text).ok_or_else(|| ReportError::malformed_date(report, row_index, &text))
}

fn extract_amount(value: ValueRef<'_>, report: &str, row_index: usize) -> ReportResult<f64> {
    match value {
        ValueRef::Integer(number) => Ok(number as f64),
        ValueRef::Real(number) => Ok(number),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            text.trim()
                .parse::<f64>()
                .map_err(|_| ReportError::non_numeric_amount(report, row_index, &text))
        }
        other => Err(ReportError::non_numeric_amount(
            report,
            row_index,
            &describe_value(other),
        )),
    }
}

fn extract_member_id(value: ValueRef<'_>, report: &str, row_index: usize) -> ReportResult<i64> {
    match value {
        ValueRef::Integer(number) => Ok(number),
        _ => Err(ReportError::missing_member_id(report, row_index)),
    }
}

fn extract_category(value: ValueRef<'_>) -> Option<String> {
    let ValueRef::Text(bytes) = value else {
        return None;
    };

    let text = String::from_utf8_lossy(bytes).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

fn describe_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => number.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).to_string(),
        ValueRef::Blob(_) => "BLOB".to_string(),
    }
}

fn map_query_error(db_path: &Path, report: &str, error: &SqliteError) -> ReportError {
    if let SqliteError::SqlInputError { .. } = error {
        return ReportError::query_failed(report, &error.to_string());
    }

    let code = error.sqlite_error_code();
    if matches!(
        code,
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::NotADatabase)
    ) {
        return map_sqlite_error(db_path, error);
    }

    ReportError::query_failed(report, &error.to_string())
}
