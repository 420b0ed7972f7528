//! Cross-category aggregation for reports and charts.

use smartcalc_domain::{
    AggregateReport, BudgetEntry, CategoryTotals, Ledger, LedgerSet, SeriesPoint, Timestamped,
    Totals,
};

/// Aggregates ledger data for summary and charting scenarios.
///
/// See also: [`smartcalc_domain::AggregateReport`] for the returned data model.
pub struct AggregationService;

impl AggregationService {
    /// Sums one ledger. `net` is the sum of per-entry nets.
    pub fn summarize_ledger(ledger: &Ledger<BudgetEntry>) -> Totals {
        ledger.iter().fold(Totals::default(), |mut totals, entry| {
            totals.income += entry.total_income();
            totals.expense += entry.total_expense();
            totals.saving += entry.total_saving();
            totals.net += entry.net();
            totals
        })
    }

    /// Builds the full report across all three ledgers.
    pub fn aggregate(ledgers: &LedgerSet) -> AggregateReport {
        let mut overall = Totals::default();
        let mut categories = Vec::with_capacity(3);
        let mut series = Vec::with_capacity(ledgers.entry_count());

        for (category, ledger) in ledgers.iter() {
            let totals = Self::summarize_ledger(ledger);
            overall.add(&totals);
            categories.push(CategoryTotals {
                category,
                totals,
                entry_count: ledger.len(),
            });

            let start = series.len();
            series.extend(ledger.iter().map(|entry| SeriesPoint {
                timestamp: entry.timestamp(),
                net: entry.net(),
                category,
            }));
            series[start..].sort_by_key(|point| point.timestamp);
        }

        tracing::debug!(
            entries = series.len(),
            overall_net = overall.net,
            "aggregated ledgers"
        );

        AggregateReport {
            categories,
            overall,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use smartcalc_domain::{Breakdown, BudgetCategory, Owner};
    use uuid::Uuid;

    fn entry(category: BudgetCategory, hours: i64, figures: [f64; 3]) -> BudgetEntry {
        let base = Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap();
        BudgetEntry::new(
            Uuid::new_v4(),
            base + Duration::hours(hours),
            category,
            Owner::guest(),
            Breakdown::from_iter([("a", figures[0])]),
            Breakdown::from_iter([("b", figures[1])]),
            Breakdown::from_iter([("c", figures[2])]),
        )
    }

    fn sample_ledgers() -> LedgerSet {
        let mut set = LedgerSet::new();
        set.append(entry(BudgetCategory::Personal, 3, [5200.0, 2000.0, 500.0]));
        set.append(entry(BudgetCategory::Personal, 1, [1000.0, 1500.0, 0.0]));
        set.append(entry(BudgetCategory::Business, 2, [9000.0, 4000.0, 1000.0]));
        set
    }

    #[test]
    fn aggregate_sums_each_category() {
        let report = AggregationService::aggregate(&sample_ledgers());
        let personal = report.totals_for(BudgetCategory::Personal).unwrap();
        assert_eq!(personal.income, 6200.0);
        assert_eq!(personal.expense, 3500.0);
        assert_eq!(personal.saving, 500.0);
        assert_eq!(personal.net, 2200.0);

        let government = report.totals_for(BudgetCategory::Government).unwrap();
        assert_eq!(*government, Totals::default());

        assert_eq!(report.overall.net, 6200.0);
        assert!(report.has_data());
    }

    #[test]
    fn series_is_ascending_within_each_category() {
        let report = AggregationService::aggregate(&sample_ledgers());
        let personal: Vec<f64> = report
            .series
            .iter()
            .filter(|point| point.category == BudgetCategory::Personal)
            .map(|point| point.net)
            .collect();
        assert_eq!(personal, vec![-500.0, 2700.0]);
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.series[2].category, BudgetCategory::Business);
    }

    #[test]
    fn empty_ledgers_produce_zeroed_report() {
        let report = AggregationService::aggregate(&LedgerSet::new());
        assert_eq!(report.categories.len(), 3);
        assert!(report
            .categories
            .iter()
            .all(|entry| entry.totals == Totals::default() && entry.entry_count == 0));
        assert!(report.series.is_empty());
        assert!(!report.has_data());
    }

    #[test]
    fn aggregate_is_idempotent() {
        let ledgers = sample_ledgers();
        assert_eq!(
            AggregationService::aggregate(&ledgers),
            AggregationService::aggregate(&ledgers)
        );
    }

    #[test]
    fn category_identity_holds() {
        let report = AggregationService::aggregate(&sample_ledgers());
        for entry in &report.categories {
            let totals = entry.totals;
            assert!((totals.income - totals.expense - totals.saving - totals.net).abs() < 1e-9);
        }
    }
}
