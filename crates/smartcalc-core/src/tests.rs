use chrono::{Duration, TimeZone, Utc};

use crate::{
    aggregation_service::AggregationService,
    audit_service::AuditService,
    currency::CurrencyCode,
    entry_builder::{EntryBuilder, EntryForm},
    net_worth_service::NetWorthService,
    session::{Session, SessionSnapshot},
    storage::snapshot_warnings,
    time::FixedClock,
};
use smartcalc_domain::{
    AuditInput, AuditThresholds, AuditTier, BreakdownKind, BudgetCategory, Ledger,
    LabelCatalog, NetWorthBounds, Owner, RawBreakdown,
};

fn clock_at(hours: i64) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap() + Duration::hours(hours))
}

#[test]
fn session_report_tracks_recorded_entries() {
    let catalog = LabelCatalog::default();
    let mut session = Session::new(Owner::new("amina"), &clock_at(0), CurrencyCode::default());

    let mut form = EntryForm::new(
        BudgetCategory::Personal,
        catalog.for_category(BudgetCategory::Personal),
    );
    form.set(BreakdownKind::Income, "Salary", 5000.0).expect("salary");
    form.set(BreakdownKind::Income, "Investments", 200.0).expect("investments");
    form.set(BreakdownKind::Expense, "Housing", 1500.0).expect("housing");
    form.set(BreakdownKind::Expense, "Food", 400.0).expect("food");
    form.set(BreakdownKind::Expense, "Transport", 100.0).expect("transport");
    form.set(BreakdownKind::Saving, "Emergency", 300.0).expect("emergency");
    form.set(BreakdownKind::Saving, "Retirement", 200.0).expect("retirement");
    session.record_entry(form.build(&clock_at(1), session.owner().clone()));

    let government: RawBreakdown = [("Tax Revenue".to_string(), Some(800.0))].into_iter().collect();
    let expense: RawBreakdown = [("Education".to_string(), Some(900.0))].into_iter().collect();
    session.record_entry(EntryBuilder::build(
        &clock_at(2),
        BudgetCategory::Government,
        &government,
        &expense,
        &RawBreakdown::new(),
        session.owner().clone(),
    ));

    let report = session.report();
    assert_eq!(report.totals_for(BudgetCategory::Personal).unwrap().net, 2700.0);
    assert_eq!(report.totals_for(BudgetCategory::Government).unwrap().net, -100.0);
    assert_eq!(report.overall.net, 2600.0);
    assert_eq!(report.series.len(), 2);

    let recent = session.ledgers().get(BudgetCategory::Personal).recent(5);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].owner().as_str(), "amina");
    assert_eq!(
        AggregationService::summarize_ledger(session.ledgers().get(BudgetCategory::Business)),
        Default::default()
    );
}

#[test]
fn audit_records_accumulate_in_session() {
    let mut session = Session::guest(&clock_at(0), CurrencyCode::default());
    let thresholds = AuditThresholds::default();
    let flagged = AuditInput {
        declared_income: 10_000.0,
        declared_assets: 0.0,
        known_contracts: 50_000.0,
        claimed_spend: 10_000.0,
        estimated_assets: 20_000.0,
    };
    session.record_audit(AuditService::record(
        &clock_at(1),
        "County Office",
        session.owner().clone(),
        flagged,
        &thresholds,
    ));
    session.record_audit(AuditService::record(
        &clock_at(2),
        "Ward Office",
        session.owner().clone(),
        AuditInput::default(),
        &thresholds,
    ));

    let recent = session.audits().recent(1);
    assert_eq!(recent[0].subject, "Ward Office");
    assert_eq!(session.audits().all()[0].result.tier, AuditTier::High);
}

#[test]
fn net_worth_scoring_uses_configured_bounds() {
    let tight = NetWorthBounds::new(0.0, 1_000.0);
    let result = NetWorthService::score(&[5_000.0], &[0.0], &tight);
    assert_eq!(result.relative_position, 1.0);

    let wide = NetWorthBounds::default();
    let result = NetWorthService::score(&[5_000.0], &[0.0], &wide);
    assert!(result.relative_position < 1.0);
}

#[test]
fn snapshot_warnings_flag_misfiled_and_duplicate_entries() {
    let entry = EntryBuilder::build(
        &clock_at(0),
        BudgetCategory::Business,
        &RawBreakdown::new(),
        &RawBreakdown::new(),
        &RawBreakdown::new(),
        Owner::guest(),
    );
    let mut personal = Ledger::new();
    personal.append(entry.clone());
    let mut business = Ledger::new();
    business.append(entry);

    let mut snapshot = SessionSnapshot::default();
    snapshot.ledgers.personal = personal;
    snapshot.ledgers.business = business;

    let warnings = snapshot_warnings(&snapshot);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("filed under personal but belongs to business"));
    assert!(warnings[1].contains("appears more than once"));
    assert!(snapshot_warnings(&SessionSnapshot::default()).is_empty());
}
