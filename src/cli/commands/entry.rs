use smartcalc_core::{currency::format_amount, CurrencyCode, EntryForm};
use smartcalc_domain::{BreakdownKind, BudgetCategory, BudgetEntry, Timestamped};

use crate::cli::args::{parse_amount, parse_category, parse_count, parse_figure};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

const USAGE: &str =
    "entry add <personal|business|government> [<income|expense|saving>:<label>=<amount> ...] | entry recent [category] [count] | entry labels [category]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "entry",
        "Record budget entries and review recent ones",
        USAGE,
        cmd_entry,
    )]
}

fn cmd_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::usage(USAGE));
    };
    match action.to_lowercase().as_str() {
        "add" => add_entry(context, rest),
        "recent" => show_recent(context, rest),
        "labels" => show_labels(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown entry action `{other}`; expected add, recent or labels"
        ))),
    }
}

fn add_entry(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((category, figures)) = args.split_first() else {
        return Err(CommandError::usage(
            "entry add <personal|business|government> [<kind>:<label>=<amount> ...]",
        ));
    };
    let category = parse_category(category)?;
    let labels = context.config.labels.for_category(category).clone();
    let mut form = EntryForm::new(category, &labels);

    if figures.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::InvalidArguments(format!(
                "no figures given; pass them as `<kind>:<label>=<amount>` (see `entry labels {category}`)"
            )));
        }
        for kind in BreakdownKind::ALL {
            for label in labels.labels(kind) {
                let raw = io::prompt_amount(&context.theme, &format!("{kind} - {label}"))?;
                form.set(kind, label, parse_amount(&raw)?)?;
            }
        }
    } else {
        for token in figures {
            let figure = parse_figure(token)?;
            form.set(figure.kind, &figure.label, figure.amount)?;
        }
    }

    let owner = context.session()?.owner().clone();
    let entry = form.build(context.clock.as_ref(), owner);
    let session = context.session_mut()?;
    let currency = session.display_currency().clone();
    let entry = session.record_entry(entry).clone();
    io::print_success(format!(
        "Recorded {} entry: income {}, expense {}, saving {}, net {}.",
        entry.category(),
        format_amount(entry.total_income(), &currency),
        format_amount(entry.total_expense(), &currency),
        format_amount(entry.total_saving(), &currency),
        format_amount(entry.net(), &currency),
    ));

    let report = session.report();
    if let Some(totals) = report.totals_for(category) {
        io::print_info(format!(
            "{} net so far: {}",
            category,
            format_amount(totals.net, &currency)
        ));
    }
    Ok(())
}

fn show_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (category, count) = match args {
        [] => (None, None),
        [first] => match first.parse::<BudgetCategory>() {
            Ok(category) => (Some(category), None),
            Err(_) => (None, Some(*first)),
        },
        [first, second, ..] => (Some(parse_category(first)?), Some(*second)),
    };
    let limit = parse_count(count, context.config.recent_limit)?;
    let session = context.session()?;
    let currency = session.display_currency();

    let categories: Vec<BudgetCategory> = match category {
        Some(category) => vec![category],
        None => BudgetCategory::ALL.to_vec(),
    };

    let mut table = Table::new(
        Some(format!("Most recent entries (up to {limit} per category)")),
        vec![
            TableColumn::new("When", 16),
            TableColumn::new("Category", 10),
            TableColumn::numeric("Income", 14),
            TableColumn::numeric("Expense", 14),
            TableColumn::numeric("Saving", 14),
            TableColumn::numeric("Net", 14),
            TableColumn::new("Owner", 12),
        ],
    );
    for category in categories {
        for entry in session.ledgers().get(category).recent(limit) {
            table.add_row(entry_row(entry, currency));
        }
    }

    if table.rows.is_empty() {
        io::print_info("No entries recorded yet.");
        return Ok(());
    }
    TableRenderer::render(&table);
    Ok(())
}

fn entry_row(entry: &BudgetEntry, currency: &CurrencyCode) -> Vec<String> {
    vec![
        entry.timestamp().format("%Y-%m-%d %H:%M").to_string(),
        entry.category().to_string(),
        format_amount(entry.total_income(), currency),
        format_amount(entry.total_expense(), currency),
        format_amount(entry.total_saving(), currency),
        format_amount(entry.net(), currency),
        entry.owner().to_string(),
    ]
}

fn show_labels(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let categories: Vec<BudgetCategory> = match args.first() {
        Some(raw) => vec![parse_category(raw)?],
        None => BudgetCategory::ALL.to_vec(),
    };
    for category in categories {
        output_section(format!("{category} labels"));
        let labels = context.config.labels.for_category(category);
        for kind in BreakdownKind::ALL {
            io::print_info(format!("  {:<8} {}", kind.key(), labels.labels(kind).join(", ")));
        }
    }
    Ok(())
}
