use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::{DATABASE_ENV_VAR, default_database_path};
use crate::{ReportError, ReportResult};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Built-in report queries. Every query, built-in or configured, must expose
/// the named columns the report needs and accept `?1`/`?2` as nullable
/// inclusive date bounds.
const DEFAULT_SPENDING_QUERY: &str = "SELECT transaction_date AS posted_on, sold_price AS amount
 FROM transactions
 WHERE (?1 IS NULL OR transaction_date >= ?1)
   AND (?2 IS NULL OR transaction_date <= ?2)
 ORDER BY transaction_date ASC";

const DEFAULT_MEMBERS_QUERY: &str =
    "SELECT transaction_date AS posted_on, sold_price AS amount, member_id
 FROM transactions
 WHERE (?1 IS NULL OR transaction_date >= ?1)
   AND (?2 IS NULL OR transaction_date <= ?2)
 ORDER BY transaction_date ASC, member_id ASC";

const DEFAULT_CATEGORIES_QUERY: &str =
    "SELECT t.transaction_date AS posted_on, t.sold_price AS amount, t.member_id, i.category
 FROM transactions t
 JOIN items i ON i.item_id = t.item_id
 WHERE (?1 IS NULL OR t.transaction_date >= ?1)
   AND (?2 IS NULL OR t.transaction_date <= ?2)
 ORDER BY t.transaction_date ASC, t.member_id ASC";

const DEFAULT_BREAKDOWN_QUERY: &str = "SELECT t.transaction_date AS posted_on, t.sold_price AS amount, t.member_id, i.category, t.discounted
 FROM transactions t
 JOIN items i ON i.item_id = t.item_id
 WHERE (?1 IS NULL OR t.transaction_date >= ?1)
   AND (?2 IS NULL OR t.transaction_date <= ?2)
 ORDER BY t.transaction_date ASC, t.member_id ASC";

const DEFAULT_FOOD_CATEGORIES: [&str; 11] = [
    "Fresh Produce",
    "Pantry",
    "Condiments",
    "Dairy",
    "Beverages",
    "Prepared Food",
    "Bread",
    "Meat",
    "Snacks",
    "Specialty Foods",
    "Frozen",
];

const DEFAULT_NON_FOOD_CATEGORIES: [&str; 7] = [
    "Misc",
    "Appliance",
    "Home",
    "Pharmacy/Hygiene",
    "Clothing",
    "Single Use",
    "Gift Cards",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLabel {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryOverrides {
    pub spending: Option<String>,
    pub members: Option<String>,
    pub categories: Option<String>,
    pub breakdown: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub database_path: Option<PathBuf>,
    pub members: Vec<MemberLabel>,
    pub food_categories: Vec<String>,
    pub non_food_categories: Vec<String>,
    pub queries: QueryOverrides,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            members: Vec::new(),
            food_categories: DEFAULT_FOOD_CATEGORIES
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
            non_food_categories: DEFAULT_NON_FOOD_CATEGORIES
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
            queries: QueryOverrides::default(),
        }
    }
}

impl ReportConfig {
    /// Loads `config.json` from the report home. A missing file is not an
    /// error; unreadable or unparseable content is.
    pub fn load(report_home: &Path) -> ReportResult<Self> {
        let config_path = config_path(report_home);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let body = fs::read_to_string(&config_path)
            .map_err(|error| ReportError::config_invalid(&config_path, &error.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|error| ReportError::config_invalid(&config_path, &error.to_string()))
    }

    /// `CARTWISE_DB` beats the config file, which beats the default location
    /// inside the report home. Relative configured paths resolve against the
    /// report home.
    pub fn resolve_database_path(&self, report_home: &Path) -> PathBuf {
        if let Some(env_path) = std::env::var_os(DATABASE_ENV_VAR) {
            return PathBuf::from(env_path);
        }

        match &self.database_path {
            Some(configured) if configured.is_absolute() => configured.clone(),
            Some(configured) => report_home.join(configured),
            None => default_database_path(report_home),
        }
    }

    pub fn member_label(&self, member_id: i64) -> String {
        self.members
            .iter()
            .find(|entry| entry.id == member_id)
            .map(|entry| entry.label.clone())
            .unwrap_or_else(|| format!("Member {member_id}"))
    }

    /// Categories in neither list count as non-food.
    pub fn is_food_category(&self, category: &str) -> bool {
        self.food_categories
            .iter()
            .any(|known| known.eq_ignore_ascii_case(category))
    }

    pub fn spending_query(&self) -> &str {
        self.queries
            .spending
            .as_deref()
            .unwrap_or(DEFAULT_SPENDING_QUERY)
    }

    pub fn members_query(&self) -> &str {
        self.queries
            .members
            .as_deref()
            .unwrap_or(DEFAULT_MEMBERS_QUERY)
    }

    pub fn categories_query(&self) -> &str {
        self.queries
            .categories
            .as_deref()
            .unwrap_or(DEFAULT_CATEGORIES_QUERY)
    }

    pub fn breakdown_query(&self) -> &str {
        self.queries
            .breakdown
            .as_deref()
            .unwrap_or(DEFAULT_BREAKDOWN_QUERY)
    }
}

pub fn config_path(report_home: &Path) -> PathBuf {
    report_home.join(CONFIG_FILE_NAME)
}
