use std::{path::PathBuf, sync::Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use smartcalc::cli::{outbox::OutboxNotifier, CliMode, ShellContext};
use smartcalc_config::ConfigManager;
use smartcalc_core::FixedClock;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a script-mode shell backed by its own temporary home directory.
///
/// Exports land in `<home>/exports`; notifications are queued in the home's outbox.
pub fn setup_shell() -> (ShellContext, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let notifier = OutboxNotifier::new(config_manager.outbox_path());
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap());

    let mut context = ShellContext::with_parts(
        CliMode::Script,
        config_manager,
        Box::new(clock),
        Box::new(notifier),
    )
    .expect("build shell context");
    context.config.export_root = Some(base.join("exports"));
    (context, base)
}

/// Runs each line through the shell, panicking on the first error.
pub fn run_all(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        if let Err(err) = smartcalc::cli::handle_line(context, line) {
            panic!("`{line}` failed: {err}");
        }
    }
}

/// Lines queued in the notification outbox so far.
pub fn outbox_lines(base: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(base.join("outbox.jsonl"))
        .map(|contents| contents.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
