mod support;

use cartwise_report::commands::spending::{self, SpendingRunOptions};
use serde_json::Value;
use support::reportkit::{create_purchase_db, insert_purchase, temp_home, write_config};

fn spending_payload(home: &std::path::Path, from: Option<&str>, to: Option<&str>) -> Value {
    let result = spending::run_with_options(SpendingRunOptions {
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    assert!(result.is_ok());
    if let Ok(success) = result {
        let payload = serde_json::to_value(success);
        assert!(payload.is_ok());
        if let Ok(value) = payload {
            return value;
        }
    }
    Value::Null
}

#[test]
fn monthly_totals_and_item_counts_share_one_axis() {
    let temp = temp_home("cartwise-spending-axis");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-03", 19.99, 1, None, false);
        insert_purchase(&connection, "2024-01-28", 5.01, 2, None, false);
        insert_purchase(&connection, "2024-04-10", 12.0, 1, None, false);

        let payload = spending_payload(&home, None, None);
        assert_eq!(payload["command"], Value::String("spending".to_string()));

        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert_eq!(months.len(), 4);
        assert_eq!(months[0]["month"], Value::String("2024-01".to_string()));
        assert_eq!(months[0]["total"], Value::from(25.0));
        assert_eq!(months[0]["items"], Value::from(2));
        assert_eq!(months[1]["total"], Value::from(0.0));
        assert_eq!(months[1]["items"], Value::from(0));
        assert_eq!(months[2]["items"], Value::from(0));
        assert_eq!(months[3]["month"], Value::String("2024-04".to_string()));
        assert_eq!(months[3]["items"], Value::from(1));

        assert_eq!(payload["data"]["total"], Value::from(37.0));
    }
}

#[test]
fn data_range_reflects_the_whole_database_not_the_window() {
    let temp = temp_home("cartwise-spending-range");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2023-06-01", 1.0, 1, None, false);
        insert_purchase(&connection, "2024-06-01", 2.0, 1, None, false);

        let payload = spending_payload(&home, Some("2024-01-01"), None);
        assert_eq!(
            payload["data"]["data_range"]["earliest"],
            Value::String("2023-06-01".to_string())
        );
        assert_eq!(
            payload["data"]["data_range"]["latest"],
            Value::String("2024-06-01".to_string())
        );

        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0]["month"], Value::String("2024-06".to_string()));
    }
}

#[test]
fn empty_window_produces_an_empty_report() {
    let temp = temp_home("cartwise-spending-empty");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-06-01", 2.0, 1, None, false);

        let payload = spending_payload(&home, Some("2025-01-01"), None);
        assert_eq!(payload["ok"], Value::Bool(true));
        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert!(months.is_empty());
        assert_eq!(payload["data"]["total"], Value::from(0.0));
    }
}

#[test]
fn non_numeric_amounts_abort_the_report() {
    let temp = temp_home("cartwise-spending-bad-amount");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-03", 19.99, 1, None, false);
        let inserted = connection.execute(
            "INSERT INTO transactions (transaction_date, sold_price, member_id)
             VALUES ('2024-01-04', 'nineteen', 1)",
            [],
        );
        assert!(inserted.is_ok());

        let result = spending::run_with_options(SpendingRunOptions {
            from: None,
            to: None,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "non_numeric_amount");
        }
    }
}

#[test]
fn write_statements_in_query_overrides_are_refused() {
    let temp = temp_home("cartwise-spending-readonly");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_config(
            &home,
            r#"{"queries": {"spending": "DELETE FROM transactions"}}"#,
        );
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-03", 19.99, 1, None, false);

        let result = spending::run_with_options(SpendingRunOptions {
            from: None,
            to: None,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("read-only"));
        }
    }
}
