use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};
use super::spending_text::push_data_range;

pub fn render_categories(data: &Value) -> io::Result<String> {
    let months = data
        .get("months")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("categories output requires months"))?;
    let series = data
        .get("series")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("categories output requires series"))?;

    if months.is_empty() || series.is_empty() {
        return Ok([
            "No categorized purchases found.",
            "",
            "Category reports need purchases joined to item categories.",
            "Check the window, or `cartwise config show` for the data range.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!(
            "Category spending: {} series across {} months.",
            series.len(),
            months.len()
        ),
        String::new(),
    ];

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Total",
            align: Align::Right,
        },
    ];

    let mut first_member = true;
    let mut member_cursor: Option<i64> = None;
    let mut member_rows: Vec<Vec<String>> = Vec::new();
    for entry in series {
        let member_id = entry.get("member_id").and_then(Value::as_i64).unwrap_or(0);
        if member_cursor != Some(member_id) {
            if let Some(_previous) = member_cursor.take() {
                lines.extend(format::render_table(&columns, &member_rows));
                member_rows.clear();
            }
            if !first_member {
                lines.push(String::new());
            }
            first_member = false;

            let label = entry
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            lines.push(format!("{label}:"));
            member_cursor = Some(member_id);
        }

        member_rows.push(vec![
            entry
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            format::format_dollars(entry.get("total").and_then(Value::as_f64).unwrap_or(0.0)),
        ]);
    }
    if member_cursor.is_some() {
        lines.extend(format::render_table(&columns, &member_rows));
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    push_data_range(&mut lines, data);

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_categories;

    #[test]
    fn series_group_into_one_block_per_member() {
        let data = json!({
            "window": {"from": null, "to": null},
            "data_range": {"earliest": "2024-01-10", "latest": "2024-03-20"},
            "months": ["2024-01", "2024-02", "2024-03"],
            "series": [
                {"member_id": 1, "label": "BF", "category": "Dairy", "values": [8.0, 0.0, 0.0], "total": 8.0},
                {"member_id": 1, "label": "BF", "category": "Meat", "values": [0.0, 3.0, 0.0], "total": 3.0},
                {"member_id": 2, "label": "RM", "category": "Home", "values": [0.0, 0.0, 2.0], "total": 2.0}
            ]
        });

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Category spending: 3 series across 3 months."));
            assert!(text.contains("BF:"));
            assert!(text.contains("RM:"));
            assert!(text.contains("Dairy"));
            assert!(text.contains("8.00"));
        }
    }

    #[test]
    fn empty_series_uses_a_plaintext_no_data_message() {
        let data = json!({
            "window": {"from": null, "to": null},
            "data_range": {"earliest": null, "latest": null},
            "months": [],
            "series": []
        });

        let rendered = render_categories(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No categorized purchases found."));
        }
    }
}
