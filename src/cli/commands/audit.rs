use smartcalc_core::{currency::format_amount, AuditService};
use smartcalc_domain::{AuditInput, AuditRecord, AuditTier, Timestamped};

use crate::cli::args::{ensure_finite_total, parse_amount, parse_count, split_pair};
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

const RUN_USAGE: &str =
    "audit run <subject> income=<n> assets=<n> contracts=<n> spend=<n> estimated=<n>";
const USAGE: &str = "audit run <subject> [field=<amount> ...] | audit list [count]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "audit",
        "Compare declared capacity against observed activity",
        USAGE,
        cmd_audit,
    )]
}

fn cmd_audit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::usage(USAGE));
    };
    match action.to_lowercase().as_str() {
        "run" => run_audit(context, rest),
        "list" => list_audits(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown audit action `{other}`; expected run or list"
        ))),
    }
}

fn run_audit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subject, fields)) = args.split_first() else {
        return Err(CommandError::usage(RUN_USAGE));
    };
    let subject = subject.trim();
    if subject.is_empty() || subject.contains('=') {
        return Err(CommandError::usage(RUN_USAGE));
    }

    let mut input = AuditInput::default();
    if fields.is_empty() {
        if !context.can_prompt() {
            return Err(CommandError::usage(RUN_USAGE));
        }
        input.declared_income = prompt(context, "Declared income")?;
        input.declared_assets = prompt(context, "Declared assets")?;
        input.known_contracts = prompt(context, "Known contracts")?;
        input.claimed_spend = prompt(context, "Claimed spending")?;
        input.estimated_assets = prompt(context, "Estimated assets")?;
    }
    for token in fields {
        let (key, value) = split_pair(token).ok_or_else(|| CommandError::usage(RUN_USAGE))?;
        let amount = parse_amount(value)?;
        match key.to_lowercase().as_str() {
            "income" => input.declared_income = amount,
            "assets" => input.declared_assets = amount,
            "contracts" => input.known_contracts = amount,
            "spend" | "spending" => input.claimed_spend = amount,
            "estimated" => input.estimated_assets = amount,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{other}`; expected income, assets, contracts, spend or estimated"
                )))
            }
        }
    }

    ensure_finite_total(
        "declared income and assets",
        &[input.declared_income, input.declared_assets],
    )?;
    ensure_finite_total(
        "contracts, spending and estimated assets",
        &[input.known_contracts, input.claimed_spend, input.estimated_assets],
    )?;

    let owner = context.session()?.owner().clone();
    let record = AuditService::record(
        context.clock.as_ref(),
        subject,
        owner,
        input,
        &context.config.audit,
    );
    let session = context.session_mut()?;
    let currency = session.display_currency().clone();
    let record = session.record_audit(record);
    let result = &record.result;

    output_section(format!("Audit: {}", record.subject));
    io::print_info(format!(
        "  Declared capacity : {}",
        format_amount(result.declared_capacity, &currency)
    ));
    io::print_info(format!(
        "  Apparent total    : {}",
        format_amount(result.apparent_total, &currency)
    ));
    io::print_info(format!(
        "  Explained         : {}",
        format_amount(result.explained_amount, &currency)
    ));
    io::print_info(format!(
        "  Unexplained       : {}",
        format_amount(result.unexplained_amount, &currency)
    ));
    io::print_info(format!("  Ratio             : {:.2}", result.ratio));
    let verdict = format!("Discrepancy tier: {}", result.tier);
    match result.tier {
        AuditTier::Normal => io::print_success(verdict),
        AuditTier::Moderate | AuditTier::High => io::print_warning(verdict),
    }
    Ok(())
}

fn prompt(context: &ShellContext, label: &str) -> Result<f64, CommandError> {
    let raw = io::prompt_amount(&context.theme, label)?;
    parse_amount(&raw)
}

fn list_audits(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = parse_count(args.first().copied(), context.config.recent_limit)?;
    let session = context.session()?;
    let recent = session.audits().recent(limit);
    if recent.is_empty() {
        io::print_info("No audits recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(
        Some(format!("Recent audits ({} of {})", recent.len(), session.audits().len())),
        vec![
            TableColumn::new("When", 16),
            TableColumn::new("Subject", 24),
            TableColumn::numeric("Ratio", 8),
            TableColumn::new("Tier", 9),
            TableColumn::new("Owner", 12),
        ],
    );
    for record in recent {
        table.add_row(audit_row(record));
    }
    TableRenderer::render(&table);
    Ok(())
}

fn audit_row(record: &AuditRecord) -> Vec<String> {
    vec![
        record.timestamp().format("%Y-%m-%d %H:%M").to_string(),
        record.subject.clone(),
        format!("{:.2}", record.result.ratio),
        record.result.tier.to_string(),
        record.owner.to_string(),
    ]
}
