use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Codes offered by the converter out of the box.
pub const SUPPORTED_CURRENCIES: [&str; 6] = ["USD", "KES", "EUR", "GBP", "INR", "JPY"];

/// Converts amounts between currencies. `None` means the pair is unavailable.
pub trait CurrencyConverter: Send + Sync {
    fn convert(&self, from: &CurrencyCode, to: &CurrencyCode, amount: f64) -> Option<f64>;

    fn supports(&self, code: &CurrencyCode) -> bool;
}

/// Static rates quoted per one unit of a pivot currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateTable {
    pivot: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Builds a table from `code -> units per pivot`. The pivot is always present at 1.0;
    /// non-positive or non-finite rates are skipped.
    pub fn new(pivot: CurrencyCode, rates: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            if rate.is_finite() && rate > 0.0 {
                table.insert(CurrencyCode::new(code), rate);
            }
        }
        table.insert(pivot.clone(), 1.0);
        Self {
            pivot,
            rates: table,
        }
    }

    pub fn pivot(&self) -> &CurrencyCode {
        &self.pivot
    }

    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(CurrencyCode::default(), default_rates())
    }
}

impl CurrencyConverter for RateTable {
    fn convert(&self, from: &CurrencyCode, to: &CurrencyCode, amount: f64) -> Option<f64> {
        if !amount.is_finite() {
            return None;
        }
        if from == to {
            return Some(amount);
        }
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Some(amount / from_rate * to_rate)
    }

    fn supports(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }
}

/// Reference rates per one USD.
pub fn default_rates() -> BTreeMap<String, f64> {
    [
        ("USD", 1.0),
        ("KES", 129.0),
        ("EUR", 0.92),
        ("GBP", 0.79),
        ("INR", 83.0),
        ("JPY", 150.0),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let sign = if value < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{fraction}", group_digits(int_part, ','))
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders `amount` as `CODE 1,234.50`.
pub fn format_amount(amount: f64, code: &CurrencyCode) -> String {
    let precision = minor_units_for(code.as_str());
    format!("{} {}", code.as_str(), format_number(amount, precision))
}
