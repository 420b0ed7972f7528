//! In-memory state for one signed-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcalc_domain::{
    AggregateReport, AuditRecord, BudgetEntry, Feedback, Ledger, LedgerSet, Owner,
};
use uuid::Uuid;

use crate::{
    aggregation_service::AggregationService,
    currency::{CurrencyCode, CurrencyConverter},
    time::Clock,
};

/// Serializable view of everything a session has recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub ledgers: LedgerSet,
    #[serde(default)]
    pub audits: Ledger<AuditRecord>,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

impl SessionSnapshot {
    pub fn record_count(&self) -> usize {
        self.ledgers.entry_count() + self.audits.len() + self.feedback.len()
    }
}

/// Counts of records merged by [`Session::absorb`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub entries: usize,
    pub audits: usize,
    pub feedback: usize,
}

/// Ledgers and preferences owned by one user for the lifetime of the shell.
///
/// Nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    owner: Owner,
    started_at: DateTime<Utc>,
    ledgers: LedgerSet,
    audits: Ledger<AuditRecord>,
    feedback: Vec<Feedback>,
    display_currency: CurrencyCode,
}

impl Session {
    pub fn new(owner: Owner, clock: &dyn Clock, display_currency: CurrencyCode) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            owner,
            started_at: clock.now(),
            ledgers: LedgerSet::new(),
            audits: Ledger::new(),
            feedback: Vec::new(),
            display_currency,
        };
        tracing::debug!(session = %session.id, owner = %session.owner, "session started");
        session
    }

    pub fn guest(clock: &dyn Clock, display_currency: CurrencyCode) -> Self {
        Self::new(Owner::guest(), clock, display_currency)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ledgers(&self) -> &LedgerSet {
        &self.ledgers
    }

    pub fn audits(&self) -> &Ledger<AuditRecord> {
        &self.audits
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn display_currency(&self) -> &CurrencyCode {
        &self.display_currency
    }

    pub fn record_entry(&mut self, entry: BudgetEntry) -> &BudgetEntry {
        tracing::info!(category = %entry.category(), net = entry.net(), "entry recorded");
        self.ledgers.append(entry)
    }

    pub fn record_audit(&mut self, record: AuditRecord) -> &AuditRecord {
        self.audits.append(record)
    }

    pub fn keep_feedback(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    pub fn report(&self) -> AggregateReport {
        AggregationService::aggregate(&self.ledgers)
    }

    /// Converts `amount`; on success the target becomes the display currency.
    pub fn convert(
        &mut self,
        converter: &dyn CurrencyConverter,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: f64,
    ) -> Option<f64> {
        let converted = converter.convert(from, to, amount)?;
        self.display_currency = to.clone();
        Some(converted)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ledgers: self.ledgers.clone(),
            audits: self.audits.clone(),
            feedback: self.feedback.clone(),
        }
    }

    /// Appends every record of `snapshot` to this session.
    pub fn absorb(&mut self, snapshot: SessionSnapshot) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for (_, ledger) in snapshot.ledgers.iter() {
            for entry in ledger {
                self.ledgers.append(entry.clone());
                summary.entries += 1;
            }
        }
        for record in snapshot.audits.all() {
            self.audits.append(record.clone());
            summary.audits += 1;
        }
        summary.feedback = snapshot.feedback.len();
        self.feedback.extend(snapshot.feedback);
        tracing::info!(
            entries = summary.entries,
            audits = summary.audits,
            feedback = summary.feedback,
            "snapshot imported"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{currency::RateTable, entry_builder::EntryBuilder, time::FixedClock};
    use chrono::TimeZone;
    use smartcalc_domain::{BudgetCategory, RawBreakdown};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap())
    }

    fn raw(label: &str, amount: f64) -> RawBreakdown {
        [(label.to_string(), Some(amount))].into_iter().collect()
    }

    #[test]
    fn conversion_updates_display_currency_only_on_success() {
        let mut session = Session::guest(&clock(), CurrencyCode::default());
        let table = RateTable::default();
        let missing = session.convert(
            &table,
            &CurrencyCode::new("USD"),
            &CurrencyCode::new("XYZ"),
            1.0,
        );
        assert!(missing.is_none());
        assert_eq!(session.display_currency().as_str(), "USD");

        let converted = session
            .convert(&table, &CurrencyCode::new("USD"), &CurrencyCode::new("KES"), 2.0)
            .unwrap();
        assert!(converted > 2.0);
        assert_eq!(session.display_currency().as_str(), "KES");
    }

    #[test]
    fn snapshot_round_trips_into_fresh_session() {
        let mut session = Session::new(Owner::new("amina"), &clock(), CurrencyCode::default());
        session.record_entry(EntryBuilder::build(
            &clock(),
            BudgetCategory::Business,
            &raw("Product Sales", 900.0),
            &raw("Inventory", 300.0),
            &raw("Reserves", 100.0),
            session.owner().clone(),
        ));
        session.keep_feedback(Feedback::new("hi", clock().0));

        let mut fresh = Session::guest(&clock(), CurrencyCode::default());
        let summary = fresh.absorb(session.snapshot());
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.feedback, 1);
        assert_eq!(fresh.ledgers().get(BudgetCategory::Business).len(), 1);
        assert_eq!(fresh.report(), session.report());
    }
}
