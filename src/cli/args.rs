//! Argument parsing helpers shared by command handlers.

use smartcalc_domain::{BreakdownKind, BudgetCategory};

use crate::cli::core::CommandError;

/// Parses a non-negative, finite amount. Accepts `_` and `,` digit separators.
pub fn parse_amount(input: &str) -> Result<f64, CommandError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '_' | ','))
        .collect();
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{input}` is not a number")))?;
    if !value.is_finite() {
        return Err(CommandError::InvalidArguments(format!(
            "`{input}` is not a finite number"
        )));
    }
    if value < 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "`{input}` cannot be negative"
        )));
    }
    Ok(value)
}

/// Parses a comma-separated list of amounts (`1000,250.5`).
pub fn parse_amount_list(input: &str) -> Result<Vec<f64>, CommandError> {
    input
        .split(&[',', ';'][..])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_amount)
        .collect()
}

/// Rejects figures whose sum does not fit in an `f64`.
pub fn ensure_finite_total(what: &str, amounts: &[f64]) -> Result<f64, CommandError> {
    let total: f64 = amounts.iter().sum();
    if total.is_finite() {
        Ok(total)
    } else {
        Err(CommandError::InvalidArguments(format!(
            "{what} add up to more than can be represented"
        )))
    }
}

pub fn parse_category(input: &str) -> Result<BudgetCategory, CommandError> {
    input
        .parse::<BudgetCategory>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

/// Splits `key=value`; returns `None` for tokens without `=`.
pub fn split_pair(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// One `kind:Label=amount` figure from `entry add`.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureArg {
    pub kind: BreakdownKind,
    pub label: String,
    pub amount: f64,
}

pub fn parse_figure(token: &str) -> Result<FigureArg, CommandError> {
    let malformed = || {
        CommandError::InvalidArguments(format!(
            "expected `<income|expense|saving>:<label>=<amount>`, got `{token}`"
        ))
    };
    let (target, amount) = split_pair(token).ok_or_else(malformed)?;
    let (kind, label) = target.split_once(':').ok_or_else(malformed)?;
    let kind = kind
        .parse::<BreakdownKind>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(malformed());
    }
    Ok(FigureArg {
        kind,
        label: label.to_string(),
        amount: parse_amount(amount)?,
    })
}

/// Parses an optional positive count, falling back to `default`.
pub fn parse_count(input: Option<&str>, default: usize) -> Result<usize, CommandError> {
    match input {
        None => Ok(default),
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{raw}` is not a positive count"))
            }),
    }
}
