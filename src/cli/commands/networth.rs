use smartcalc_core::{currency::format_amount, NetWorthService};

use crate::cli::args::{ensure_finite_total, parse_amount_list, split_pair};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const USAGE: &str = "networth assets=<a,b,...> liabilities=<x,y,...>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "networth",
        "Score a net worth on a log scale between the configured bounds",
        USAGE,
        cmd_networth,
    )]
}

fn cmd_networth(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut assets = Vec::new();
    let mut liabilities = Vec::new();

    if args.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::usage(USAGE));
        }
        let raw = io::prompt_text(&context.theme, "Assets (comma separated)")?;
        assets = parse_amount_list(&raw)?;
        let raw = io::prompt_text(&context.theme, "Liabilities (comma separated)")?;
        liabilities = parse_amount_list(&raw)?;
    }

    for token in args {
        let (key, value) = split_pair(token).ok_or_else(|| CommandError::usage(USAGE))?;
        match key.to_lowercase().as_str() {
            "assets" | "asset" => assets.extend(parse_amount_list(value)?),
            "liabilities" | "liability" | "debts" => {
                liabilities.extend(parse_amount_list(value)?)
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{other}`; expected assets or liabilities"
                )))
            }
        }
    }

    ensure_finite_total("assets", &assets)?;
    ensure_finite_total("liabilities", &liabilities)?;

    let result = NetWorthService::score(&assets, &liabilities, &context.config.net_worth);
    let currency = context.session()?.display_currency();

    output_section("Net worth");
    io::print_info(format!("  Assets      : {}", format_amount(result.assets, currency)));
    io::print_info(format!(
        "  Liabilities : {}",
        format_amount(result.liabilities, currency)
    ));
    io::print_info(format!("  Net worth   : {}", format_amount(result.net, currency)));
    io::print_info(format!(
        "  Position    : {:.1}% (log scale, up to {})",
        result.relative_position * 100.0,
        format_amount(context.config.net_worth.upper, currency)
    ));
    io::print_info(format!("  Standing    : {}", result.standing));
    io::print_hint(result.standing.advice());
    Ok(())
}
