use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};
use super::spending_text::push_data_range;

/// The member panel renders as a month × member matrix: one row per month,
/// one column per member, zeros included. The same shape feeds a multi-line
/// chart.
pub fn render_members(data: &Value) -> io::Result<String> {
    let months = data
        .get("months")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("members output requires months"))?;
    let series = data
        .get("series")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("members output requires series"))?;

    if months.is_empty() || series.is_empty() {
        return Ok([
            "No purchases found.",
            "",
            "The configured window matched no transactions. Widen or drop",
            "--from/--to, or check `cartwise config show` for the data range.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!(
            "Spending by member: {} members across {} months.",
            series.len(),
            months.len()
        ),
        String::new(),
        "Monthly panel:".to_string(),
    ];

    let labels = series
        .iter()
        .map(|entry| {
            entry
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string()
        })
        .collect::<Vec<String>>();

    let mut columns = vec![Column {
        name: "Month",
        align: Align::Left,
    }];
    columns.extend(labels.iter().map(|label| Column {
        name: label.as_str(),
        align: Align::Right,
    }));

    let table_rows = months
        .iter()
        .enumerate()
        .map(|(month_index, month)| {
            let mut row = vec![month.as_str().unwrap_or("unknown").to_string()];
            for entry in series {
                let value = entry
                    .get("values")
                    .and_then(Value::as_array)
                    .and_then(|values| values.get(month_index))
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                row.push(format::format_dollars(value));
            }
            row
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(format::render_table(&columns, &table_rows));

    lines.push(String::new());
    lines.push("Totals:".to_string());
    let totals = series
        .iter()
        .map(|entry| {
            (
                entry
                    .get("label")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown"),
                format::format_dollars(entry.get("total").and_then(Value::as_f64).unwrap_or(0.0)),
            )
        })
        .collect::<Vec<(&str, String)>>();
    lines.extend(format::key_value_rows(&totals, 2));
    push_data_range(&mut lines, data);

    Ok(lines.join("\n"))
}
