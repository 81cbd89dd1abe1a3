use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_spending(data: &Value) -> io::Result<String> {
    let months = data
        .get("months")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("spending output requires months"))?;

    if months.is_empty() {
        return Ok([
            "No purchases found.",
            "",
            "The configured window matched no transactions. Widen or drop",
            "--from/--to, or check `cartwise config show` for the data range.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        heading(months.len(), data),
        String::new(),
        "Monthly totals:".to_string(),
    ];

    let columns = [
        Column {
            name: "Month",
            align: Align::Left,
        },
        Column {
            name: "Dollars",
            align: Align::Right,
        },
        Column {
            name: "Items",
            align: Align::Right,
        },
    ];

    let table_rows = months
        .iter()
        .map(|row| {
            vec![
                row.get("month")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                format::format_dollars(row.get("total").and_then(Value::as_f64).unwrap_or(0.0)),
                row.get("items")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table(&columns, &table_rows));

    let total = data.get("total").and_then(Value::as_f64).unwrap_or(0.0);
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push(format!("  Total spent:  {}", format::format_dollars(total)));
    push_data_range(&mut lines, data);

    Ok(lines.join("\n"))
}

fn heading(month_count: usize, data: &Value) -> String {
    let from = data
        .get("window")
        .and_then(|window| window.get("from"))
        .and_then(Value::as_str);
    let to = data
        .get("window")
        .and_then(|window| window.get("to"))
        .and_then(Value::as_str);

    match (from, to) {
        (Some(start), Some(end)) => {
            format!("Household spending across {month_count} months from {start} to {end}.")
        }
        (Some(start), None) => {
            format!("Household spending across {month_count} months from {start} onward.")
        }
        (None, Some(end)) => {
            format!("Household spending across {month_count} months up to {end}.")
        }
        (None, None) => format!("Household spending across {month_count} months."),
    }
}

pub(crate) fn push_data_range(lines: &mut Vec<String>, data: &Value) {
    if let Some(range) = data.get("data_range") {
        let earliest = range.get("earliest").and_then(Value::as_str);
        let latest = range.get("latest").and_then(Value::as_str);
        if earliest.is_some() || latest.is_some() {
            lines.push(format!(
                "  Data covers:  {} to {}",
                earliest.unwrap_or("unknown"),
                latest.unwrap_or("unknown")
            ));
        }
    }
}
