use chrono::{Duration, TimeZone, Utc};
use smartcalc_core::{
    storage::SnapshotStorage, AuditService, CurrencyCode, FixedClock, Session, SessionSnapshot,
};
use smartcalc_domain::{
    AuditInput, AuditThresholds, Breakdown, BudgetCategory, BudgetEntry, Feedback, Owner,
};
use smartcalc_export::{
    audits_csv, category_csv, entries_csv, parse_snapshot, FileExporter, ENTRIES_CSV_FILE,
};
use tempfile::tempdir;
use uuid::Uuid;

fn clock_at(hours: i64) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::hours(hours))
}

fn entry(category: BudgetCategory, hours: i64, figures: [f64; 3], owner: &str) -> BudgetEntry {
    BudgetEntry::new(
        Uuid::new_v4(),
        clock_at(hours).0,
        category,
        Owner::new(owner),
        Breakdown::from_iter([("income", figures[0])]),
        Breakdown::from_iter([("expense", figures[1])]),
        Breakdown::from_iter([("saving", figures[2])]),
    )
}

fn populated_session() -> Session {
    let mut session = Session::new(Owner::new("amina"), &clock_at(0), CurrencyCode::default());
    session.record_entry(entry(
        BudgetCategory::Business,
        2,
        [9000.0, 4000.0, 1000.0],
        "amina",
    ));
    session.record_entry(entry(
        BudgetCategory::Personal,
        1,
        [5200.0, 2000.0, 500.0],
        "amina",
    ));
    session.record_entry(entry(
        BudgetCategory::Government,
        3,
        [100.0, 250.0, 50.0],
        "amina",
    ));
    let thresholds = AuditThresholds::default();
    session.record_audit(AuditService::record(
        &clock_at(4),
        "County Office",
        Owner::new("amina"),
        AuditInput {
            declared_income: 10_000.0,
            declared_assets: 0.0,
            known_contracts: 50_000.0,
            claimed_spend: 10_000.0,
            estimated_assets: 20_000.0,
        },
        &thresholds,
    ));
    session.record_audit(AuditService::record(
        &clock_at(5),
        "Ward, \"North\"",
        Owner::new("amina"),
        AuditInput {
            declared_income: 100_000.0,
            declared_assets: 50_000.0,
            known_contracts: 10_000.0,
            claimed_spend: 5_000.0,
            estimated_assets: 20_000.0,
        },
        &thresholds,
    ));
    session.keep_feedback(Feedback::new("Keep the charts", clock_at(6).0).with_name("Otieno"));
    session
}

#[test]
fn entries_csv_lists_every_entry_in_reporting_order() {
    let session = populated_session();
    let bytes = entries_csv(session.ledgers()).expect("csv");
    let text = String::from_utf8(bytes).expect("utf8");
    insta::assert_snapshot!(text.trim_end(), @r###"
timestamp,category,total_income,total_expense,total_saving,net,owner
2025-06-01T13:00:00Z,personal,5200.00,2000.00,500.00,2700.00,amina
2025-06-01T14:00:00Z,business,9000.00,4000.00,1000.00,4000.00,amina
2025-06-01T15:00:00Z,government,100.00,250.00,50.00,-200.00,amina
"###);
}

#[test]
fn category_csv_keeps_only_that_ledger() {
    let session = populated_session();
    let ledger = session.ledgers().get(BudgetCategory::Business);
    let bytes = category_csv(BudgetCategory::Business, ledger).expect("csv");
    let text = String::from_utf8(bytes).expect("utf8");
    insta::assert_snapshot!(text.trim_end(), @r###"
timestamp,category,total_income,total_expense,total_saving,net,owner
2025-06-01T14:00:00Z,business,9000.00,4000.00,1000.00,4000.00,amina
"###);
}

#[test]
fn category_export_uses_a_per_category_file_name() {
    let dir = tempdir().expect("tempdir");
    let exporter = FileExporter::new(dir.path().to_path_buf());
    let session = populated_session();

    let path = exporter
        .export_category_csv(
            BudgetCategory::Personal,
            session.ledgers().get(BudgetCategory::Personal),
            None,
        )
        .expect("export category csv");
    assert_eq!(path, dir.path().join("smartcalc_personal_entries.csv"));
    let text = std::fs::read_to_string(&path).expect("read");
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("personal,5200.00"));
}

#[test]
fn audits_csv_quotes_subjects_and_reports_tiers() {
    let session = populated_session();
    let bytes = audits_csv(session.audits()).expect("csv");
    let text = String::from_utf8(bytes).expect("utf8");
    insta::assert_snapshot!(text.trim_end(), @r###"
timestamp,subject,declared_capacity,apparent_total,ratio,tier,owner
2025-06-01T16:00:00Z,County Office,10000.00,80000.00,8.0000,high,amina
2025-06-01T17:00:00Z,"Ward, ""North""",150000.00,35000.00,0.2333,normal,amina
"###);
}

#[test]
fn empty_session_exports_header_only() {
    let session = Session::guest(&clock_at(0), CurrencyCode::default());
    let text = String::from_utf8(entries_csv(session.ledgers()).expect("csv")).expect("utf8");
    assert_eq!(
        text,
        "timestamp,category,total_income,total_expense,total_saving,net,owner\n"
    );
}

#[test]
fn json_snapshot_imports_into_fresh_session() {
    let dir = tempdir().expect("tempdir");
    let exporter = FileExporter::new(dir.path().to_path_buf());
    let session = populated_session();

    let path = exporter
        .export_json(&session.snapshot(), None)
        .expect("export json");
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    for key in ["personal", "business", "government", "audits", "feedback"] {
        assert!(raw.get(key).is_some(), "missing {key}");
    }
    assert_eq!(raw["personal"][0]["total_income"], 5200.0);

    let snapshot = exporter.load_snapshot(&path).expect("load");
    let mut fresh = Session::guest(&clock_at(0), CurrencyCode::default());
    let summary = fresh.absorb(snapshot);
    assert_eq!(summary.entries, 3);
    assert_eq!(summary.audits, 2);
    assert_eq!(summary.feedback, 1);
    assert_eq!(fresh.report(), session.report());
}

#[test]
fn imported_totals_are_recomputed_from_breakdowns() {
    let json = r#"{
        "personal": [{
            "id": "7d0f3a52-3c1b-4d8e-9a55-0b0c8a8f3f10",
            "timestamp": "2025-06-01T12:00:00Z",
            "category": "personal",
            "owner": "amina",
            "income_breakdown": { "Salary": 1000.0 },
            "expense_breakdown": { "Food": 300.0 },
            "saving_breakdown": {},
            "total_income": 999999.0,
            "total_expense": 0.0,
            "total_saving": 0.0,
            "net": 999999.0
        }]
    }"#;
    let snapshot: SessionSnapshot = parse_snapshot(json).expect("parse");
    let entry = &snapshot.ledgers.personal.all()[0];
    assert_eq!(entry.total_income(), 1000.0);
    assert_eq!(entry.net(), 700.0);
    assert!(snapshot.audits.is_empty());
    assert!(snapshot.feedback.is_empty());
}

#[test]
fn missing_or_corrupt_snapshot_fails() {
    let dir = tempdir().expect("tempdir");
    let exporter = FileExporter::new(dir.path().to_path_buf());
    assert!(exporter.load_snapshot(&dir.path().join("absent.json")).is_err());

    let corrupt = dir.path().join("corrupt.json");
    std::fs::write(&corrupt, "[1, 2").expect("write");
    assert!(exporter.load_snapshot(&corrupt).is_err());
}

#[test]
fn csv_exports_land_in_root_by_default() {
    let dir = tempdir().expect("tempdir");
    let exporter = FileExporter::new(dir.path().join("exports"));
    let session = populated_session();

    let path = exporter
        .export_entries_csv(session.ledgers(), None)
        .expect("export csv");
    assert_eq!(path, dir.path().join("exports").join(ENTRIES_CSV_FILE));
    let written = std::fs::read_to_string(&path).expect("read");
    assert_eq!(written.lines().count(), 4);

    let named = exporter
        .export_audits_csv(session.audits(), Some("county.csv"))
        .expect("export audits");
    assert_eq!(named, dir.path().join("exports").join("county.csv"));
}
