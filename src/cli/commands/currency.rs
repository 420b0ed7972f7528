use smartcalc_core::{
    currency::{format_amount, format_number},
    CurrencyCode,
};

use crate::cli::args::parse_amount;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

const USAGE: &str = "convert <amount> <from> <to> | convert rates";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "convert",
        "Convert an amount and switch the display currency",
        USAGE,
        cmd_convert,
    )]
}

fn cmd_convert(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [action] if action.eq_ignore_ascii_case("rates") => show_rates(context),
        [amount, from, to] => convert(context, amount, from, to),
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn convert(context: &mut ShellContext, amount: &str, from: &str, to: &str) -> CommandResult {
    let amount = parse_amount(amount)?;
    let from = CurrencyCode::new(from);
    let to = CurrencyCode::new(to);
    let session = context.session.as_mut().ok_or(CommandError::NotSignedIn)?;

    match session.convert(&context.rates, &from, &to, amount) {
        Some(converted) => {
            tracing::info!(%from, %to, amount, converted, "currency converted");
            io::print_success(format!(
                "{} = {}",
                format_amount(amount, &from),
                format_amount(converted, &to)
            ));
            io::print_info(format!("Display currency is now {to}."));
            Ok(())
        }
        None => {
            tracing::warn!(%from, %to, "conversion unavailable");
            let known: Vec<String> = context.rates.codes().map(ToString::to_string).collect();
            Err(CommandError::InvalidArguments(format!(
                "cannot convert {from} to {to}; known currencies: {}",
                known.join(", ")
            )))
        }
    }
}

fn show_rates(context: &mut ShellContext) -> CommandResult {
    let pivot = context.rates.pivot().clone();
    let mut table = Table::new(
        Some(format!("Reference rates per 1 {pivot}")),
        vec![
            TableColumn::new("Currency", 8),
            TableColumn::numeric("Rate", 12),
        ],
    );
    for code in context.rates.codes() {
        if let Some(rate) = context.rates.rate(code) {
            table.add_row(vec![code.to_string(), format_number(rate, 4)]);
        }
    }
    TableRenderer::render(&table);
    Ok(())
}
