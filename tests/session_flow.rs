mod common;

use common::{outbox_lines, run_all, setup_shell};
use smartcalc::cli::core::{CommandError, LoopControl};
use smartcalc::cli::handle_line;
use smartcalc::errors::AppError;
use smartcalc_config::{ConfigError, ConfigManager};
use smartcalc_core::{CoreError, CurrencyCode};
use smartcalc_domain::{AuditTier, BudgetCategory};

#[test]
fn protected_commands_need_a_session() {
    let (mut context, _) = setup_shell();
    let err = handle_line(&mut context, "report").unwrap_err();
    assert!(matches!(err, CommandError::NotSignedIn));

    // Open commands still work.
    run_all(&mut context, &["help", "version"]);
}

#[test]
fn guest_entry_updates_the_personal_ledger() {
    let (mut context, _) = setup_shell();
    run_all(
        &mut context,
        &[
            "guest",
            "entry add personal income:Salary=5000 income:Other=200 expense:Housing=1500 expense:food=500 saving:Emergency=500",
            "report",
            "entry recent",
        ],
    );

    let session = context.session().unwrap();
    assert!(session.owner().is_guest());
    let ledger = session.ledgers().get(BudgetCategory::Personal);
    assert_eq!(ledger.len(), 1);
    let entry = ledger.last().unwrap();
    assert_eq!(entry.total_income(), 5200.0);
    assert_eq!(entry.total_expense(), 2000.0);
    assert_eq!(entry.total_saving(), 500.0);
    assert_eq!(entry.net(), 2700.0);
    // Untouched labels are still present as zero.
    assert_eq!(entry.income_breakdown().get("Investments"), Some(0.0));
    assert_eq!(entry.expense_breakdown().get("Food"), Some(500.0));
}

#[test]
fn entry_rejects_unknown_labels_and_negative_amounts() {
    let (mut context, _) = setup_shell();
    run_all(&mut context, &["guest"]);

    let err = handle_line(&mut context, "entry add business income:Salary=10").unwrap_err();
    assert!(matches!(
        err,
        CommandError::App(AppError::Core(CoreError::UnknownLabel { .. }))
    ));

    let err = handle_line(&mut context, "entry add personal income:Salary=-10").unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));

    let err = handle_line(&mut context, "entry add personal").unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));

    assert!(context.session().unwrap().ledgers().is_empty());
}

#[test]
fn admin_sign_in_checks_password_and_queues_notification() {
    let (mut context, base) = setup_shell();
    context.config.admin_password = Some("s3cret".into());
    context.config.admin_email = Some("admin@smartcalc.test".into());

    let err = handle_line(&mut context, "login admin wrong").unwrap_err();
    assert!(matches!(
        err,
        CommandError::App(AppError::Core(CoreError::Authentication(_)))
    ));
    assert!(context.session.is_none());
    assert!(outbox_lines(&base).is_empty());

    run_all(&mut context, &["login Admin s3cret"]);
    assert_eq!(context.session().unwrap().owner().as_str(), "Admin");

    let lines = outbox_lines(&base);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("admin@smartcalc.test"));
    assert!(lines[0].contains("SmartCalc login"));
}

#[test]
fn feedback_is_kept_locally_without_an_admin_address() {
    let (mut context, base) = setup_shell();
    run_all(
        &mut context,
        &["login amina", "feedback \"Great tool\" name=Amina email=amina@example.com"],
    );
    let session = context.session().unwrap();
    assert_eq!(session.feedback().len(), 1);
    assert_eq!(session.feedback()[0].message, "Great tool");
    assert!(outbox_lines(&base).is_empty());

    let err = handle_line(&mut context, "feedback").unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));
}

#[test]
fn feedback_is_delivered_when_an_admin_address_exists() {
    let (mut context, base) = setup_shell();
    context.config.admin_email = Some("admin@smartcalc.test".into());
    run_all(&mut context, &["guest", "feedback please add charts"]);

    assert!(context.session().unwrap().feedback().is_empty());
    let lines = outbox_lines(&base);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("please add charts"));
}

#[test]
fn audits_accumulate_in_the_session() {
    let (mut context, _) = setup_shell();
    run_all(
        &mut context,
        &[
            "guest",
            "audit run \"Ministry of Works\" income=6000 assets=4000 contracts=30000 spend=20000 estimated=30000",
            "audit run Clinic income=100000 assets=50000 contracts=20000 spend=10000 estimated=5000",
            "audit list",
        ],
    );

    let audits = context.session().unwrap().audits();
    assert_eq!(audits.len(), 2);
    let first = &audits.all()[0];
    assert_eq!(first.subject, "Ministry of Works");
    assert!((first.result.ratio - 8.0).abs() < 1e-6);
    assert_eq!(first.result.tier, AuditTier::High);
    assert_eq!(audits.all()[1].result.tier, AuditTier::Normal);
}

#[test]
fn figures_that_overflow_totals_are_rejected() {
    let (mut context, _) = setup_shell();
    run_all(&mut context, &["guest"]);

    let err = handle_line(
        &mut context,
        "audit run Overflow income=1e308 assets=1e308 contracts=0 spend=0 estimated=0",
    )
    .unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));

    let err = handle_line(
        &mut context,
        "networth assets=1e308,1e308 liabilities=1e308,1e308",
    )
    .unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));

    let err = handle_line(
        &mut context,
        "entry add personal income:Salary=1e308 income:Other=1e308",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CommandError::App(AppError::Core(CoreError::Validation(_)))
    ));

    let session = context.session().unwrap();
    assert!(session.audits().is_empty());
    assert!(session.ledgers().is_empty());

    run_all(
        &mut context,
        &["audit run Large income=0 assets=0 contracts=1e308 spend=0 estimated=0"],
    );
    let record = &context.session().unwrap().audits().all()[0];
    assert!(record.result.ratio.is_finite());
    assert_eq!(record.result.tier, AuditTier::High);
}

#[test]
fn conversion_switches_display_currency_only_on_success() {
    let (mut context, _) = setup_shell();
    run_all(&mut context, &["guest", "convert 100 usd kes"]);
    assert_eq!(
        context.session().unwrap().display_currency(),
        &CurrencyCode::new("KES")
    );

    let err = handle_line(&mut context, "convert 5 USD XYZ").unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));
    assert_eq!(
        context.session().unwrap().display_currency(),
        &CurrencyCode::new("KES")
    );
}

#[test]
fn snapshot_export_can_be_imported_into_a_fresh_session() {
    let (mut context, base) = setup_shell();
    run_all(
        &mut context,
        &[
            "login otieno",
            "entry add business income:\"Product Sales\"=9000 expense:Salaries=4000",
            "entry add government income:Grants=1000",
            "audit run Depot income=10 assets=0 contracts=0 spend=0 estimated=0",
            "export json snapshot.json",
            "export csv",
            "export csv business",
            "export csv government gov.csv",
            "export audits",
        ],
    );
    let exports = base.join("exports");
    assert!(exports.join("snapshot.json").exists());
    assert!(exports.join(smartcalc_export::ENTRIES_CSV_FILE).exists());
    assert!(exports.join(smartcalc_export::AUDITS_CSV_FILE).exists());
    let business = std::fs::read_to_string(
        exports.join(smartcalc_export::category_csv_file(BudgetCategory::Business)),
    )
    .unwrap();
    assert_eq!(business.lines().count(), 2);
    assert!(!business.contains("government"));
    assert!(exports.join("gov.csv").exists());

    run_all(&mut context, &["logout", "guest", "import snapshot.json"]);
    let session = context.session().unwrap();
    assert_eq!(session.ledgers().entry_count(), 2);
    assert_eq!(session.audits().len(), 1);
    let report = session.report();
    assert_eq!(
        report.totals_for(BudgetCategory::Business).unwrap().net,
        5000.0
    );

    let err = handle_line(&mut context, "import missing.json").unwrap_err();
    assert!(matches!(
        err,
        CommandError::App(AppError::Core(CoreError::Storage(_)))
    ));
}

#[test]
fn config_set_persists_and_rejects_invalid_values() {
    let (mut context, base) = setup_shell();
    run_all(&mut context, &["guest", "config set audit.high 5", "config show"]);
    assert_eq!(context.config.audit.high, 5.0);

    let stored = ConfigManager::with_base_dir(base.clone())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(stored.audit.high, 5.0);

    let err = handle_line(&mut context, "config set audit.moderate 9").unwrap_err();
    assert!(matches!(
        err,
        CommandError::App(AppError::Config(ConfigError::InvalidValue { .. }))
    ));
    assert_eq!(context.config.audit.moderate, 1.2);
}

#[test]
fn logout_discards_the_session_and_exit_stops_the_loop() {
    let (mut context, _) = setup_shell();
    run_all(&mut context, &["guest", "logout"]);
    assert!(context.session.is_none());

    assert_eq!(
        handle_line(&mut context, "reprot").unwrap(),
        LoopControl::Continue
    );
    assert_eq!(handle_line(&mut context, "exit").unwrap(), LoopControl::Exit);
    assert!(!context.running);
}
