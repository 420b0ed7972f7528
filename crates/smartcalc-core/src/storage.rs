use std::{collections::HashSet, path::Path};

use smartcalc_domain::{Identifiable, LedgerSet};

use crate::{session::SessionSnapshot, CoreError};

/// Abstraction over backends that persist whole session snapshots.
pub trait SnapshotStorage: Send + Sync {
    fn save_snapshot(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<(), CoreError>;
    fn load_snapshot(&self, path: &Path) -> Result<SessionSnapshot, CoreError>;
}

/// Detects misfiled entries and duplicate ids within a snapshot.
pub fn snapshot_warnings(snapshot: &SessionSnapshot) -> Vec<String> {
    let mut warnings = misfiled_entries(&snapshot.ledgers);
    let mut seen = HashSet::new();

    for (_, ledger) in snapshot.ledgers.iter() {
        for entry in ledger {
            if !seen.insert(entry.id()) {
                warnings.push(format!("entry {} appears more than once", entry.id()));
            }
        }
    }
    for record in snapshot.audits.iter() {
        if !seen.insert(record.id()) {
            warnings.push(format!("audit {} appears more than once", record.id()));
        }
    }
    warnings
}

fn misfiled_entries(ledgers: &LedgerSet) -> Vec<String> {
    let mut warnings = Vec::new();
    for (category, ledger) in ledgers.iter() {
        for entry in ledger {
            if entry.category() != category {
                warnings.push(format!(
                    "entry {} is filed under {} but belongs to {}",
                    entry.id(),
                    category.key(),
                    entry.category().key()
                ));
            }
        }
    }
    warnings
}
