//! smartcalc-export
//!
//! JSON snapshots and CSV reports for SmartCalc sessions.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use smartcalc_core::{storage::SnapshotStorage, CoreError, SessionSnapshot};
use smartcalc_domain::{AuditRecord, BudgetCategory, BudgetEntry, Ledger, LedgerSet, Timestamped};

pub const SNAPSHOT_FILE: &str = "smartcalc_snapshot.json";
pub const ENTRIES_CSV_FILE: &str = "smartcalc_entries.csv";
pub const AUDITS_CSV_FILE: &str = "smartcalc_audits.csv";

/// Default file name for a single category's entries, e.g. `smartcalc_personal_entries.csv`.
pub fn category_csv_file(category: BudgetCategory) -> String {
    format!("smartcalc_{}_entries.csv", category.key())
}
const TMP_SUFFIX: &str = "tmp";

const ENTRY_HEADER: [&str; 7] = [
    "timestamp",
    "category",
    "total_income",
    "total_expense",
    "total_saving",
    "net",
    "owner",
];

const AUDIT_HEADER: [&str; 7] = [
    "timestamp",
    "subject",
    "declared_capacity",
    "apparent_total",
    "ratio",
    "tier",
    "owner",
];

/// Filesystem exporter rooted at a single output directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    root: PathBuf,
}

impl FileExporter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolves a user-supplied target; bare names land inside the root.
    pub fn resolve(&self, target: Option<&str>, default_name: &str) -> PathBuf {
        match target.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => {
                let path = PathBuf::from(value);
                if path.is_absolute() || path.components().count() > 1 {
                    path
                } else {
                    self.root.join(path)
                }
            }
            None => self.root.join(default_name),
        }
    }

    pub fn export_json(
        &self,
        snapshot: &SessionSnapshot,
        target: Option<&str>,
    ) -> Result<PathBuf, CoreError> {
        let path = self.resolve(target, SNAPSHOT_FILE);
        self.save_snapshot(snapshot, &path)?;
        Ok(path)
    }

    pub fn export_entries_csv(
        &self,
        ledgers: &LedgerSet,
        target: Option<&str>,
    ) -> Result<PathBuf, CoreError> {
        let path = self.resolve(target, ENTRIES_CSV_FILE);
        write_atomic(&path, &entries_csv(ledgers)?)?;
        tracing::info!(path = %path.display(), rows = ledgers.entry_count(), "entries exported");
        Ok(path)
    }

    pub fn export_category_csv(
        &self,
        category: BudgetCategory,
        ledger: &Ledger<BudgetEntry>,
        target: Option<&str>,
    ) -> Result<PathBuf, CoreError> {
        let path = self.resolve(target, &category_csv_file(category));
        write_atomic(&path, &category_csv(category, ledger)?)?;
        tracing::info!(
            path = %path.display(),
            category = %category,
            rows = ledger.len(),
            "category entries exported"
        );
        Ok(path)
    }

    pub fn export_audits_csv(
        &self,
        audits: &Ledger<AuditRecord>,
        target: Option<&str>,
    ) -> Result<PathBuf, CoreError> {
        let path = self.resolve(target, AUDITS_CSV_FILE);
        write_atomic(&path, &audits_csv(audits)?)?;
        tracing::info!(path = %path.display(), rows = audits.len(), "audits exported");
        Ok(path)
    }
}

impl SnapshotStorage for FileExporter {
    fn save_snapshot(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<(), CoreError> {
        let json = serialize_snapshot(snapshot)?;
        write_atomic(path, json.as_bytes())?;
        tracing::info!(path = %path.display(), records = snapshot.record_count(), "snapshot exported");
        Ok(())
    }

    fn load_snapshot(&self, path: &Path) -> Result<SessionSnapshot, CoreError> {
        if !path.exists() {
            return Err(CoreError::Storage(format!(
                "snapshot `{}` not found",
                path.display()
            )));
        }
        let data = fs::read_to_string(path)?;
        parse_snapshot(&data)
    }
}

pub fn serialize_snapshot(snapshot: &SessionSnapshot) -> Result<String, CoreError> {
    serde_json::to_string_pretty(snapshot).map_err(|err| CoreError::Serde(err.to_string()))
}

pub fn parse_snapshot(data: &str) -> Result<SessionSnapshot, CoreError> {
    serde_json::from_str(data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// One row per entry, categories in reporting order.
pub fn entries_csv(ledgers: &LedgerSet) -> Result<Vec<u8>, CoreError> {
    write_entries(ledgers.iter())
}

/// Entries of a single category, same layout as [`entries_csv`].
pub fn category_csv(
    category: BudgetCategory,
    ledger: &Ledger<BudgetEntry>,
) -> Result<Vec<u8>, CoreError> {
    write_entries(std::iter::once((category, ledger)))
}

fn write_entries<'a>(
    ledgers: impl Iterator<Item = (BudgetCategory, &'a Ledger<BudgetEntry>)>,
) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ENTRY_HEADER).map_err(csv_error)?;
    for (category, ledger) in ledgers {
        for entry in ledger {
            writer
                .write_record([
                    timestamp(entry.timestamp()),
                    category.key().to_string(),
                    amount(entry.total_income()),
                    amount(entry.total_expense()),
                    amount(entry.total_saving()),
                    amount(entry.net()),
                    entry.owner().to_string(),
                ])
                .map_err(csv_error)?;
        }
    }
    finish(writer)
}

pub fn audits_csv(audits: &Ledger<AuditRecord>) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(AUDIT_HEADER).map_err(csv_error)?;
    for record in audits {
        writer
            .write_record([
                timestamp(record.timestamp),
                record.subject.clone(),
                amount(record.result.declared_capacity),
                amount(record.result.apparent_total),
                format!("{:.4}", record.result.ratio),
                record.result.tier.to_string(),
                record.owner.to_string(),
            ])
            .map_err(csv_error)?;
    }
    finish(writer)
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn amount(value: f64) -> String {
    format!("{value:.2}")
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, CoreError> {
    writer
        .into_inner()
        .map_err(|err| CoreError::Storage(err.to_string()))
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes through a sibling temp file and renames it into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
