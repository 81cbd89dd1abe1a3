use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tempfile::{Builder, TempDir};

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("report-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

/// Creates the externally-owned purchase database inside the report home,
/// at the default location cartwise resolves.
pub fn create_purchase_db(home: &Path) -> Connection {
    let connection = Connection::open(home.join("purchases.db"));
    assert!(connection.is_ok());
    let connection = match connection {
        Ok(value) => value,
        Err(_) => unreachable!("fixture database must open"),
    };

    let created = connection.execute_batch(
        "CREATE TABLE transactions (
            transaction_date TEXT NOT NULL,
            sold_price REAL NOT NULL,
            member_id INTEGER NOT NULL,
            item_id INTEGER,
            discounted INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE items (
            item_id INTEGER PRIMARY KEY,
            category TEXT NOT NULL
        );",
    );
    assert!(created.is_ok());

    connection
}

pub fn insert_item(connection: &Connection, item_id: i64, category: &str) {
    let inserted = connection.execute(
        "INSERT INTO items (item_id, category) VALUES (?1, ?2)",
        params![item_id, category],
    );
    assert!(inserted.is_ok());
}

pub fn insert_purchase(
    connection: &Connection,
    date: &str,
    amount: f64,
    member_id: i64,
    item_id: Option<i64>,
    discounted: bool,
) {
    let inserted = connection.execute(
        "INSERT INTO transactions (transaction_date, sold_price, member_id, item_id, discounted)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![date, amount, member_id, item_id, i64::from(discounted)],
    );
    assert!(inserted.is_ok());
}

pub fn write_config(home: &Path, body: &str) {
    let written = fs::write(home.join("config.json"), body);
    assert!(written.is_ok());
}
