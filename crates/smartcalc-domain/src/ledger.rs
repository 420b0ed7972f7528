//! Append-only ledgers and the per-category ledger set.

use serde::{Deserialize, Serialize};

use crate::{category::BudgetCategory, common::Timestamped, entry::BudgetEntry};

/// Ordered, append-only collection of timestamped records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ledger<T> {
    records: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Timestamped> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. This is the only mutation a ledger supports.
    pub fn append(&mut self, record: T) -> &T {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Up to `n` records, newest first by timestamp.
    pub fn recent(&self, n: usize) -> Vec<&T> {
        let mut newest: Vec<&T> = self.records.iter().rev().collect();
        newest.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        newest.truncate(n);
        newest
    }

    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<'a, T> IntoIterator for &'a Ledger<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One entry ledger per budget category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSet {
    #[serde(default)]
    pub personal: Ledger<BudgetEntry>,
    #[serde(default)]
    pub business: Ledger<BudgetEntry>,
    #[serde(default)]
    pub government: Ledger<BudgetEntry>,
}

impl LedgerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: BudgetCategory) -> &Ledger<BudgetEntry> {
        match category {
            BudgetCategory::Personal => &self.personal,
            BudgetCategory::Business => &self.business,
            BudgetCategory::Government => &self.government,
        }
    }

    /// Appends the entry to the ledger matching its own category.
    pub fn append(&mut self, entry: BudgetEntry) -> &BudgetEntry {
        let ledger = match entry.category() {
            BudgetCategory::Personal => &mut self.personal,
            BudgetCategory::Business => &mut self.business,
            BudgetCategory::Government => &mut self.government,
        };
        ledger.append(entry)
    }

    /// Ledgers in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (BudgetCategory, &Ledger<BudgetEntry>)> + '_ {
        BudgetCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn entry_count(&self) -> usize {
        self.iter().map(|(_, ledger)| ledger.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
