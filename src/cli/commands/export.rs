use smartcalc_core::{snapshot_warnings, SnapshotStorage};
use smartcalc_domain::BudgetCategory;
use smartcalc_export::SNAPSHOT_FILE;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const EXPORT_USAGE: &str = "export <json|csv [category]|audits> [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write the session to a JSON snapshot or CSV report",
            EXPORT_USAGE,
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Load a JSON snapshot into the current session",
            "import [path]",
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((format, rest)) = args.split_first() else {
        return Err(CommandError::usage(EXPORT_USAGE));
    };
    let target = rest.first().copied();
    let exporter = context.exporter();
    let session = context.session()?;

    let path = match format.to_lowercase().as_str() {
        "json" => exporter.export_json(&session.snapshot(), target)?,
        "csv" => match target.map(str::parse::<BudgetCategory>) {
            Some(Ok(category)) => exporter.export_category_csv(
                category,
                session.ledgers().get(category),
                rest.get(1).copied(),
            )?,
            _ => exporter.export_entries_csv(session.ledgers(), target)?,
        },
        "audits" => exporter.export_audits_csv(session.audits(), target)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown export format `{other}`; expected json, csv or audits"
            )))
        }
    };
    io::print_success(format!("Exported to {}.", path.display()));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let exporter = context.exporter();
    let path = exporter.resolve(args.first().copied(), SNAPSHOT_FILE);
    let snapshot = exporter.load_snapshot(&path)?;

    for warning in snapshot_warnings(&snapshot) {
        io::print_warning(warning);
    }
    let summary = context.session_mut()?.absorb(snapshot);
    io::print_success(format!(
        "Imported {} entries, {} audits and {} feedback messages from {}.",
        summary.entries,
        summary.audits,
        summary.feedback,
        path.display()
    ));
    Ok(())
}
