use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};

use crate::config::ReportConfig;
use crate::contracts::types::DataRange;
use crate::state::{map_sqlite_error, open_readonly_connection, resolve_report_home};
use crate::{ReportError, ReportResult};

const TRANSACTIONS_TABLE: &str = "transactions";
const REQUIRED_TRANSACTION_COLUMNS: [&str; 3] = ["transaction_date", "sold_price", "member_id"];

/// Everything a report command needs before it runs its query: the resolved
/// home, the loaded config, the verified database path, and the observed
/// purchase date range.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub home: PathBuf,
    pub config: ReportConfig,
    pub db_path: PathBuf,
    pub data_range: DataRange,
}

pub fn ensure_readable() -> ReportResult<ReportContext> {
    ensure_readable_with_home_override(None)
}

pub fn ensure_readable_at(home_override: &Path) -> ReportResult<ReportContext> {
    ensure_readable_with_home_override(Some(home_override))
}

fn ensure_readable_with_home_override(
    home_override: Option<&Path>,
) -> ReportResult<ReportContext> {
    let home = resolve_report_home(home_override)?;
    let config = ReportConfig::load(&home)?;
    let db_path = config.resolve_database_path(&home);

    let connection = open_readonly_connection(&db_path)?;
    verify_transactions_table(&connection, &db_path)?;
    let data_range = read_data_range(&connection, &db_path)?;

    Ok(ReportContext {
        home,
        config,
        db_path,
        data_range,
    })
}

fn verify_transactions_table(connection: &Connection, db_path: &Path) -> ReportResult<()> {
    let exists = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
            [TRANSACTIONS_TABLE],
            |_row| Ok(true),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .unwrap_or(false);

    if !exists {
        return Err(ReportError::db_schema_mismatch(
            db_path,
            "no `transactions` table",
        ));
    }

    let columns = transactions_columns(connection, db_path)?;
    for required_column in REQUIRED_TRANSACTION_COLUMNS {
        if !columns.iter().any(|column| column == required_column) {
            return Err(ReportError::db_schema_mismatch(
                db_path,
                &format!("`transactions` has no `{required_column}` column"),
            ));
        }
    }

    Ok(())
}

fn transactions_columns(connection: &Connection, db_path: &Path) -> ReportResult<Vec<String>> {
    // Constant table name, so the PRAGMA interpolation is not user-reachable.
    let sql = format!("PRAGMA table_info({TRANSACTIONS_TABLE})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns: Vec<String> = Vec::new();
    for row in column_iter {
        let column = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        columns.push(column);
    }

    Ok(columns)
}

pub(crate) fn read_data_range(connection: &Connection, db_path: &Path) -> ReportResult<DataRange> {
    let mut statement = connection
        .prepare("SELECT MIN(transaction_date), MAX(transaction_date) FROM transactions")
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let row = statement
        .query_row([], |result_row| {
            let earliest = result_row.get::<_, Option<String>>(0)?;
            let latest = result_row.get::<_, Option<String>>(1)?;
            Ok(DataRange { earliest, latest })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(row)
}
