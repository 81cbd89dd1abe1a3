use std::io;

use serde_json::Value;

use super::format;
use super::spending_text::push_data_range;

const BUCKET_LABELS: [(&str, &str); 4] = [
    ("food_full", "Food items at full price"),
    ("food_sale", "Food items on sale"),
    ("non_food_full", "Non-food items at full price"),
    ("non_food_sale", "Non-food items on sale"),
];

/// One block per member: the four pivot buckets with dollar amounts and the
/// share of that member's total.
pub fn render_breakdown(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("breakdown output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No categorized purchases found.",
            "",
            "The breakdown needs purchases joined to item categories.",
            "Check the window, or `cartwise config show` for the data range.",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!("Spending breakdown for {} members.", rows.len()),
        String::new(),
    ];

    for (row_index, row) in rows.iter().enumerate() {
        let label = row.get("label").and_then(Value::as_str).unwrap_or("unknown");
        let total = row.get("total").and_then(Value::as_f64).unwrap_or(0.0);
        lines.push(format!(
            "{label} (total spent: {}):",
            format::format_dollars(total)
        ));

        let entries = BUCKET_LABELS
            .iter()
            .map(|(key, bucket_label)| {
                let amount = row
                    .get("buckets")
                    .and_then(|buckets| buckets.get(key))
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                let share = if total > 0.0 {
                    format!(" ({:.1}%)", amount / total * 100.0)
                } else {
                    String::new()
                };
                (
                    *bucket_label,
                    format!("{}{share}", format::format_dollars(amount)),
                )
            })
            .collect::<Vec<(&str, String)>>();
        lines.extend(format::key_value_rows(&entries, 2));

        if row_index + 1 < rows.len() {
            lines.push(String::new());
        }
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    push_data_range(&mut lines, data);

    Ok(lines.join("\n"))
}
