mod support;

use cartwise_report::commands::members::{self, MembersRunOptions};
use serde_json::Value;
use support::reportkit::{create_purchase_db, insert_purchase, temp_home, write_config};

fn members_payload(home: &std::path::Path, from: Option<&str>, to: Option<&str>) -> Value {
    let result = members::run_with_options(MembersRunOptions {
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
fn panel_is_dense_across_the_observed_month_range() {
    let temp = temp_home("cartwise-members-dense");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-15", 10.0, 1, None, false);
        insert_purchase(&connection, "2024-03-02", 5.0, 2, None, false);

        let payload = members_payload(&home, None, None);
        assert_eq!(payload["command"], Value::String("members".to_string()));

        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0], Value::String("2024-01".to_string()));
        assert_eq!(months[1], Value::String("2024-02".to_string()));
        assert_eq!(months[2], Value::String("2024-03".to_string()));

        let series = payload["data"]["series"].as_array().cloned().unwrap_or_default();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["member_id"], Value::from(1));
        assert_eq!(series[0]["values"][0], Value::from(10.0));
        assert_eq!(series[0]["values"][1], Value::from(0.0));
        assert_eq!(series[0]["values"][2], Value::from(0.0));
        assert_eq!(series[1]["values"][0], Value::from(0.0));
        assert_eq!(series[1]["values"][2], Value::from(5.0));
    }
}

#[test]
fn member_labels_come_from_the_configured_directory() {
    let temp = temp_home("cartwise-members-labels");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_config(
            &home,
            r#"{"members": [{"id": 1, "label": "BF"}, {"id": 2, "label": "RM"}]}"#,
        );
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-05-01", 7.0, 1, None, false);
        insert_purchase(&connection, "2024-05-02", 3.0, 9, None, false);

        let payload = members_payload(&home, None, None);
        let series = payload["data"]["series"].as_array().cloned().unwrap_or_default();
        assert_eq!(series[0]["label"], Value::String("BF".to_string()));
        assert_eq!(series[1]["label"], Value::String("Member 9".to_string()));
    }
}

#[test]
fn window_bounds_are_applied_before_panel_construction() {
    let temp = temp_home("cartwise-members-window");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2023-10-01", 50.0, 1, None, false);
        insert_purchase(&connection, "2024-02-10", 8.0, 1, None, false);
        insert_purchase(&connection, "2024-06-30", 2.0, 2, None, false);

        let payload = members_payload(&home, Some("2024-01-01"), Some("2024-03-31"));
        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0], Value::String("2024-02".to_string()));

        let series = payload["data"]["series"].as_array().cloned().unwrap_or_default();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0]["total"], Value::from(8.0));
    }
}

#[test]
fn empty_database_produces_an_empty_panel_not_an_error() {
    let temp = temp_home("cartwise-members-empty");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let _connection = create_purchase_db(&home);

        let payload = members_payload(&home, None, None);
        assert_eq!(payload["ok"], Value::Bool(true));
        let months = payload["data"]["months"].as_array().cloned().unwrap_or_default();
        assert!(months.is_empty());
        let series = payload["data"]["series"].as_array().cloned().unwrap_or_default();
        assert!(series.is_empty());
    }
}

#[test]
fn malformed_dates_abort_the_report_instead_of_undercounting() {
    let temp = temp_home("cartwise-members-bad-date");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-15", 10.0, 1, None, false);
        insert_purchase(&connection, "01/15/2024", 10.0, 1, None, false);

        let result = members::run_with_options(MembersRunOptions {
            from: None,
            to: None,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "malformed_date");
        }
    }
}

#[test]
fn query_override_missing_member_column_is_a_shape_mismatch() {
    let temp = temp_home("cartwise-members-shape");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_config(
            &home,
            r#"{"queries": {"members": "SELECT transaction_date AS posted_on, sold_price AS amount FROM transactions WHERE (?1 IS NULL OR transaction_date >= ?1) AND (?2 IS NULL OR transaction_date <= ?2)"}}"#,
        );
        let connection = create_purchase_db(&home);
        insert_purchase(&connection, "2024-01-15", 10.0, 1, None, false);

        let result = members::run_with_options(MembersRunOptions {
            from: None,
            to: None,
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "query_shape_mismatch");
        }
    }
}

#[test]
fn inverted_window_is_rejected_before_touching_the_database() {
    let temp = temp_home("cartwise-members-range");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = members::run_with_options(MembersRunOptions {
            from: Some("2024-03-01".to_string()),
            to: Some("2024-02-01".to_string()),
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}
