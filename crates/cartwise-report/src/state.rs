use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, OpenFlags, ffi::ErrorCode};

use crate::{ReportError, ReportResult};

pub const HOME_ENV_VAR: &str = "CARTWISE_HOME";
pub const DATABASE_ENV_VAR: &str = "CARTWISE_DB";

pub fn resolve_report_home(home_override: Option<&Path>) -> ReportResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".cartwise")
            } else {
                return Err(ReportError::db_open_failed(
                    Path::new("."),
                    "Could not resolve a home directory for cartwise.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn default_database_path(report_home: &Path) -> PathBuf {
    report_home.join("purchases.db")
}

/// The purchase database is externally owned; cartwise only ever opens it
/// read-only, and the connection's scope bounds the acquisition.
pub fn open_readonly_connection(db_path: &Path) -> ReportResult<Connection> {
    if !db_path.exists() {
        return Err(ReportError::db_missing(db_path));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI;
    let connection = Connection::open_with_flags(db_path, flags)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(Duration::from_millis(250))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ReportError {
    let error_code = error.sqlite_error_code();

    if matches!(
        error_code,
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    ) {
        return ReportError::db_locked(path);
    }

    if matches!(error_code, Some(ErrorCode::NotADatabase)) {
        return ReportError::db_corrupt(path);
    }

    if matches!(
        error_code,
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly)
    ) {
        return ReportError::db_permission_denied(path, &error.to_string());
    }

    ReportError::db_open_failed(path, &error.to_string())
}

fn absolutize(path: &Path) -> ReportResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ReportError::db_open_failed(path, &error.to_string()))
}
