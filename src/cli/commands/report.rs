use smartcalc_core::currency::{format_amount, format_number};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Summarise every ledger: totals, expense shares and the net series",
        "report [series]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let show_series = match args.first() {
        None => false,
        Some(value) if value.eq_ignore_ascii_case("series") => true,
        Some(_) => return Err(CommandError::usage("report [series]")),
    };

    let session = context.session()?;
    let report = session.report();
    let currency = session.display_currency();
    if !report.has_data() {
        io::print_info("No data yet. Record entries with `entry add` first.");
        return Ok(());
    }

    let mut totals = Table::new(
        Some(format!("Totals ({currency})")),
        vec![
            TableColumn::new("Category", 10),
            TableColumn::numeric("Entries", 7),
            TableColumn::numeric("Income", 16),
            TableColumn::numeric("Expense", 16),
            TableColumn::numeric("Saving", 16),
            TableColumn::numeric("Net", 16),
        ],
    );
    for row in &report.categories {
        totals.add_row(vec![
            row.category.to_string(),
            row.entry_count.to_string(),
            format_amount(row.totals.income, currency),
            format_amount(row.totals.expense, currency),
            format_amount(row.totals.saving, currency),
            format_amount(row.totals.net, currency),
        ]);
    }
    let entry_count: usize = report.categories.iter().map(|row| row.entry_count).sum();
    totals.add_row(vec![
        "Overall".to_string(),
        entry_count.to_string(),
        format_amount(report.overall.income, currency),
        format_amount(report.overall.expense, currency),
        format_amount(report.overall.saving, currency),
        format_amount(report.overall.net, currency),
    ]);
    TableRenderer::render(&totals);

    let mut shares = Table::new(
        Some("Expense distribution"),
        vec![
            TableColumn::new("Category", 10),
            TableColumn::numeric("Share", 8),
        ],
    );
    for share in report.expense_shares() {
        shares.add_row(vec![
            share.category.to_string(),
            format!("{}%", format_number(share.share * 100.0, 1)),
        ]);
    }
    TableRenderer::render(&shares);

    if show_series {
        let mut series = Table::new(
            Some("Net balance over time"),
            vec![
                TableColumn::new("When", 19),
                TableColumn::new("Category", 10),
                TableColumn::numeric("Net", 16),
            ],
        );
        for point in &report.series {
            series.add_row(vec![
                point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                point.category.to_string(),
                format_amount(point.net, currency),
            ]);
        }
        TableRenderer::render(&series);
    }
    Ok(())
}
