use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_config_show(data: &Value) -> io::Result<String> {
    let home = data
        .get("home")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("config output requires home"))?;

    let config_path = data.get("config_path").and_then(Value::as_str).unwrap_or("unknown");
    let config_present = data
        .get("config_file_present")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let db_path = data.get("db_path").and_then(Value::as_str).unwrap_or("unknown");
    let db_present = data
        .get("db_present")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = vec!["Cartwise configuration:".to_string()];
    let entries = [
        ("Home:", home.to_string()),
        (
            "Config file:",
            annotate_presence(config_path, config_present, "using defaults"),
        ),
        (
            "Database:",
            annotate_presence(db_path, db_present, "not found"),
        ),
        ("Data covers:", data_range_line(data)),
    ];
    lines.extend(format::key_value_rows(&entries, 2));

    lines.push(String::new());
    lines.push("Member directory:".to_string());
    let members = data
        .get("members")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if members.is_empty() {
        lines.push("  (empty; members render as `Member <id>`)".to_string());
    } else {
        let columns = [
            Column {
                name: "Id",
                align: Align::Right,
            },
            Column {
                name: "Label",
                align: Align::Left,
            },
        ];
        let rows = members
            .iter()
            .map(|entry| {
                vec![
                    entry.get("id").and_then(Value::as_i64).unwrap_or(0).to_string(),
                    entry
                        .get("label")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &rows));
    }

    lines.push(String::new());
    lines.push(format!(
        "Food categories:      {}",
        join_list(data, "food_categories")
    ));
    lines.push(format!(
        "Non-food categories:  {}",
        join_list(data, "non_food_categories")
    ));

    Ok(lines.join("\n"))
}

fn annotate_presence(path: &str, present: bool, absent_note: &str) -> String {
    if present {
        path.to_string()
    } else {
        format!("{path} ({absent_note})")
    }
}

fn data_range_line(data: &Value) -> String {
    let range = data.get("data_range");
    let earliest = range
        .and_then(|value| value.get("earliest"))
        .and_then(Value::as_str);
    let latest = range
        .and_then(|value| value.get("latest"))
        .and_then(Value::as_str);

    match (earliest, latest) {
        (Some(start), Some(end)) => format!("{start} to {end}"),
        _ => "no purchases recorded".to_string(),
    }
}

fn join_list(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
                .join(", ")
        })
        .unwrap_or_default()
}
