use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WindowHint {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// One dense month bucket of the household spending report: summed dollars
/// and the number of purchase rows that month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySpendRow {
    pub month: String,
    pub total: f64,
    pub items: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingData {
    pub window: WindowHint,
    pub data_range: DataRange,
    pub months: Vec<MonthlySpendRow>,
    pub total: f64,
}

/// One line of the member chart: a value for every month on the shared axis.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSeries {
    pub member_id: i64,
    pub label: String,
    pub values: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberPanelData {
    pub window: WindowHint,
    pub data_range: DataRange,
    pub months: Vec<String>,
    pub series: Vec<MemberSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySeries {
    pub member_id: i64,
    pub label: String,
    pub category: String,
    pub values: Vec<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPanelData {
    pub window: WindowHint,
    pub data_range: DataRange,
    pub months: Vec<String>,
    pub series: Vec<CategorySeries>,
}

/// The four slices of a per-member breakdown pie.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownBuckets {
    pub food_full: f64,
    pub food_sale: f64,
    pub non_food_full: f64,
    pub non_food_sale: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberBreakdownRow {
    pub member_id: i64,
    pub label: String,
    pub buckets: BreakdownBuckets,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownData {
    pub window: WindowHint,
    pub data_range: DataRange,
    pub rows: Vec<MemberBreakdownRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDirectoryRow {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigShowData {
    pub home: String,
    pub config_path: String,
    pub config_file_present: bool,
    pub db_path: String,
    pub db_present: bool,
    pub members: Vec<MemberDirectoryRow>,
    pub food_categories: Vec<String>,
    pub non_food_categories: Vec<String>,
    pub data_range: Option<DataRange>,
}
