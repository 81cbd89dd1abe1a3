use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A dense (month-start, member) table with no missing combinations. Every
/// member observed in the input has a value for every month on the axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyPanel {
    months: Vec<NaiveDate>,
    members: Vec<i64>,
    cells: BTreeMap<(NaiveDate, i64), f64>,
}

impl MonthlyPanel {
    pub(crate) fn new(
        months: Vec<NaiveDate>,
        members: Vec<i64>,
        cells: BTreeMap<(NaiveDate, i64), f64>,
    ) -> Self {
        Self {
            months,
            members,
            cells,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// Members in first-observed input order.
    pub fn members(&self) -> &[i64] {
        &self.members
    }

    /// `None` only for combinations outside the panel.
    pub fn amount(&self, month: NaiveDate, member_id: i64) -> Option<f64> {
        self.cells.get(&(month, member_id)).copied()
    }

    /// One value per month on the axis, zero-filled: the "one column per
    /// member" projection charting needs.
    pub fn member_series(&self, member_id: i64) -> Vec<f64> {
        self.months
            .iter()
            .map(|month| self.amount(*month, member_id).unwrap_or(0.0))
            .collect()
    }

    pub fn member_total(&self, member_id: i64) -> f64 {
        self.member_series(member_id).iter().sum()
    }

    /// Flattened (month, member, amount) triples covering every cell.
    pub fn triples(&self) -> Vec<(NaiveDate, i64, f64)> {
        let mut flattened = Vec::with_capacity(self.months.len() * self.members.len());
        for month in &self.months {
            for member_id in &self.members {
                flattened.push((
                    *month,
                    *member_id,
                    self.amount(*month, *member_id).unwrap_or(0.0),
                ));
            }
        }
        flattened
    }
}

/// The category generalization: dense across months per (member, category)
/// pair, deliberately not dense across categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPanel {
    months: Vec<NaiveDate>,
    groups: Vec<(i64, String)>,
    cells: BTreeMap<(NaiveDate, i64, String), f64>,
}

impl CategoryPanel {
    pub(crate) fn new(
        months: Vec<NaiveDate>,
        groups: Vec<(i64, String)>,
        cells: BTreeMap<(NaiveDate, i64, String), f64>,
    ) -> Self {
        Self {
            months,
            groups,
            cells,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// (member, category) pairs in first-observed input order.
    pub fn groups(&self) -> &[(i64, String)] {
        &self.groups
    }

    pub fn amount(&self, month: NaiveDate, member_id: i64, category: &str) -> Option<f64> {
        self.cells
            .get(&(month, member_id, category.to_string()))
            .copied()
    }

    pub fn group_series(&self, member_id: i64, category: &str) -> Vec<f64> {
        self.months
            .iter()
            .map(|month| self.amount(*month, member_id, category).unwrap_or(0.0))
            .collect()
    }

    pub fn group_total(&self, member_id: i64, category: &str) -> f64 {
        self.group_series(member_id, category).iter().sum()
    }
}
