//! Budget entries and their labelled breakdowns.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::BudgetCategory, common::*};

/// Caller-supplied figures keyed by label; `None` marks an empty field.
pub type RawBreakdown = BTreeMap<String, Option<f64>>;

/// Normalised label → amount mapping for one side of an entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Breakdown(BTreeMap<String, f64>);

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a breakdown, treating absent or non-finite amounts as zero.
    pub fn from_raw(raw: &RawBreakdown) -> Self {
        Self(
            raw.iter()
                .map(|(label, amount)| (label.clone(), amount_or_zero(*amount)))
                .collect(),
        )
    }

    pub fn insert(&mut self, label: impl Into<String>, amount: f64) {
        self.0.insert(label.into(), amount_or_zero(Some(amount)));
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(label, amount)| (label.as_str(), *amount))
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        let mut breakdown = Breakdown::new();
        for (label, amount) in iter {
            breakdown.insert(label, amount);
        }
        breakdown
    }
}

/// One submitted budget record. Totals and net are derived from the
/// breakdowns at construction and cannot be set independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "EntryRecord")]
pub struct BudgetEntry {
    id: Uuid,
    timestamp: DateTime<Utc>,
    category: BudgetCategory,
    owner: Owner,
    income_breakdown: Breakdown,
    expense_breakdown: Breakdown,
    saving_breakdown: Breakdown,
    total_income: f64,
    total_expense: f64,
    total_saving: f64,
    net: f64,
}

impl BudgetEntry {
    pub fn new(
        id: Uuid,
        timestamp: DateTime<Utc>,
        category: BudgetCategory,
        owner: Owner,
        income_breakdown: Breakdown,
        expense_breakdown: Breakdown,
        saving_breakdown: Breakdown,
    ) -> Self {
        let total_income = income_breakdown.total();
        let total_expense = expense_breakdown.total();
        let total_saving = saving_breakdown.total();
        Self {
            id,
            timestamp,
            category,
            owner,
            income_breakdown,
            expense_breakdown,
            saving_breakdown,
            total_income,
            total_expense,
            total_saving,
            net: total_income - total_expense - total_saving,
        }
    }

    pub fn category(&self) -> BudgetCategory {
        self.category
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn income_breakdown(&self) -> &Breakdown {
        &self.income_breakdown
    }

    pub fn expense_breakdown(&self) -> &Breakdown {
        &self.expense_breakdown
    }

    pub fn saving_breakdown(&self) -> &Breakdown {
        &self.saving_breakdown
    }

    pub fn total_income(&self) -> f64 {
        self.total_income
    }

    pub fn total_expense(&self) -> f64 {
        self.total_expense
    }

    pub fn total_saving(&self) -> f64 {
        self.total_saving
    }

    pub fn net(&self) -> f64 {
        self.net
    }
}

impl Identifiable for BudgetEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for BudgetEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Serialized shape accepted on import. Stored totals are ignored and
/// recomputed from the breakdowns.
#[derive(Deserialize)]
struct EntryRecord {
    id: Uuid,
    timestamp: DateTime<Utc>,
    category: BudgetCategory,
    #[serde(default)]
    owner: Owner,
    #[serde(default)]
    income_breakdown: Breakdown,
    #[serde(default)]
    expense_breakdown: Breakdown,
    #[serde(default)]
    saving_breakdown: Breakdown,
}

impl From<EntryRecord> for BudgetEntry {
    fn from(record: EntryRecord) -> Self {
        BudgetEntry::new(
            record.id,
            record.timestamp,
            record.category,
            record.owner,
            record.income_breakdown,
            record.expense_breakdown,
            record.saving_breakdown,
        )
    }
}
