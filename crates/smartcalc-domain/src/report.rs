//! Derived reporting structures. Recomputed on every query, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::BudgetCategory;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Summed income, expense, saving and net figures.
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub saving: f64,
    pub net: f64,
}

impl Totals {
    /// Sum of every inflow and outflow, used to detect "no data".
    pub fn activity(&self) -> f64 {
        self.income + self.expense + self.saving
    }

    pub fn add(&mut self, other: &Totals) {
        self.income += other.income;
        self.expense += other.expense;
        self.saving += other.saving;
        self.net += other.net;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Aggregated totals for one category.
pub struct CategoryTotals {
    pub category: BudgetCategory,
    #[serde(flatten)]
    pub totals: Totals,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single point of the net-balance time series.
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub net: f64,
    pub category: BudgetCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Share of the overall expense attributable to one category.
pub struct ExpenseShare {
    pub category: BudgetCategory,
    pub expense: f64,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Cross-category report used for tables and charts.
pub struct AggregateReport {
    pub categories: Vec<CategoryTotals>,
    pub overall: Totals,
    pub series: Vec<SeriesPoint>,
}

impl AggregateReport {
    /// `false` when no income, expense or saving has been recorded anywhere.
    pub fn has_data(&self) -> bool {
        let activity: f64 = self
            .categories
            .iter()
            .map(|entry| entry.totals.activity())
            .sum();
        activity != 0.0
    }

    pub fn totals_for(&self, category: BudgetCategory) -> Option<&Totals> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| &entry.totals)
    }

    /// Each category's fraction of overall expense; all zero when nothing was spent.
    pub fn expense_shares(&self) -> Vec<ExpenseShare> {
        let overall = self.overall.expense;
        self.categories
            .iter()
            .map(|entry| ExpenseShare {
                category: entry.category,
                expense: entry.totals.expense,
                share: if overall.abs() > f64::EPSILON {
                    entry.totals.expense / overall
                } else {
                    0.0
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(expenses: [f64; 3]) -> AggregateReport {
        let categories: Vec<CategoryTotals> = BudgetCategory::ALL
            .into_iter()
            .zip(expenses)
            .map(|(category, expense)| CategoryTotals {
                category,
                totals: Totals {
                    income: 0.0,
                    expense,
                    saving: 0.0,
                    net: -expense,
                },
                entry_count: 1,
            })
            .collect();
        let mut overall = Totals::default();
        for entry in &categories {
            overall.add(&entry.totals);
        }
        AggregateReport {
            categories,
            overall,
            series: Vec::new(),
        }
    }

    #[test]
    fn expense_shares_sum_to_one() {
        let report = report_with([100.0, 300.0, 600.0]);
        let shares = report.expense_shares();
        let total: f64 = shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((shares[2].share - 0.6).abs() < 1e-12);
    }

    #[test]
    fn expense_shares_are_zero_without_spending() {
        let report = report_with([0.0, 0.0, 0.0]);
        assert!(report.expense_shares().iter().all(|s| s.share == 0.0));
        assert!(!report.has_data());
    }
}
