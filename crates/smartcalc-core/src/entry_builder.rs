//! Turns raw labelled figures into immutable budget entries.

use smartcalc_domain::{
    amount_or_zero, BreakdownKind, Breakdown, BudgetCategory, BudgetEntry, LabelSet, Owner,
    RawBreakdown,
};
use uuid::Uuid;

use crate::{time::Clock, CoreError};

/// Builds [`BudgetEntry`] values from caller-supplied figures.
pub struct EntryBuilder;

impl EntryBuilder {
    /// Normalises the three breakdowns and computes totals and net.
    ///
    /// Absent amounts count as zero; sign is not re-checked here. Never fails.
    pub fn build(
        clock: &dyn Clock,
        category: BudgetCategory,
        income: &RawBreakdown,
        expense: &RawBreakdown,
        saving: &RawBreakdown,
        owner: Owner,
    ) -> BudgetEntry {
        let entry = BudgetEntry::new(
            Uuid::new_v4(),
            clock.now(),
            category,
            owner,
            Breakdown::from_raw(income),
            Breakdown::from_raw(expense),
            Breakdown::from_raw(saving),
        );
        tracing::debug!(
            category = %category,
            total_income = entry.total_income(),
            total_expense = entry.total_expense(),
            total_saving = entry.total_saving(),
            net = entry.net(),
            "built budget entry"
        );
        entry
    }
}

/// Collects one submission for a category, checked against its label set.
///
/// Every label of the set starts out empty, so the resulting entry always
/// carries the full key set.
#[derive(Debug, Clone)]
pub struct EntryForm<'a> {
    category: BudgetCategory,
    labels: &'a LabelSet,
    income: RawBreakdown,
    expense: RawBreakdown,
    saving: RawBreakdown,
}

impl<'a> EntryForm<'a> {
    pub fn new(category: BudgetCategory, labels: &'a LabelSet) -> Self {
        let empty = |kind| {
            labels
                .labels(kind)
                .iter()
                .map(|label| (label.clone(), None))
                .collect::<RawBreakdown>()
        };
        Self {
            category,
            labels,
            income: empty(BreakdownKind::Income),
            expense: empty(BreakdownKind::Expense),
            saving: empty(BreakdownKind::Saving),
        }
    }

    pub fn category(&self) -> BudgetCategory {
        self.category
    }

    /// Records a figure, rejecting unknown labels, negative amounts and figures
    /// that would push a total or the net out of the finite range.
    pub fn set(&mut self, kind: BreakdownKind, label: &str, amount: f64) -> Result<(), CoreError> {
        let canonical = self
            .labels
            .canonical(kind, label)
            .ok_or_else(|| CoreError::UnknownLabel {
                category: self.category,
                kind,
                label: label.trim().to_string(),
            })?
            .to_string();
        if !amount.is_finite() {
            return Err(CoreError::Validation(format!(
                "{canonical} must be a finite number"
            )));
        }
        if amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "{canonical} cannot be negative (got {amount})"
            )));
        }
        let previous = self.side_mut(kind).insert(canonical.clone(), Some(amount));
        if !self.totals_are_finite() {
            match previous {
                Some(previous) => self.side_mut(kind).insert(canonical.clone(), previous),
                None => self.side_mut(kind).remove(&canonical),
            };
            return Err(CoreError::Validation(format!(
                "{canonical} pushes the {} total out of range",
                kind.key()
            )));
        }
        Ok(())
    }

    fn side_mut(&mut self, kind: BreakdownKind) -> &mut RawBreakdown {
        match kind {
            BreakdownKind::Income => &mut self.income,
            BreakdownKind::Expense => &mut self.expense,
            BreakdownKind::Saving => &mut self.saving,
        }
    }

    fn totals_are_finite(&self) -> bool {
        let total = |side: &RawBreakdown| {
            side.values()
                .map(|amount| amount_or_zero(*amount))
                .sum::<f64>()
        };
        let income = total(&self.income);
        let expense = total(&self.expense);
        let saving = total(&self.saving);
        [income, expense, saving, income - expense - saving]
            .iter()
            .all(|value| value.is_finite())
    }

    pub fn build(&self, clock: &dyn Clock, owner: Owner) -> BudgetEntry {
        EntryBuilder::build(
            clock,
            self.category,
            &self.income,
            &self.expense,
            &self.saving,
            owner,
        )
    }
}
