//! Budget categories and the fixed label sets each one accepts.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The three budgeting domains a session keeps ledgers for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Personal,
    Business,
    Government,
}

impl BudgetCategory {
    /// Every category in reporting order.
    pub const ALL: [BudgetCategory; 3] = [
        BudgetCategory::Personal,
        BudgetCategory::Business,
        BudgetCategory::Government,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BudgetCategory::Personal => "personal",
            BudgetCategory::Business => "business",
            BudgetCategory::Government => "government",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetCategory::Personal => "Personal",
            BudgetCategory::Business => "Business",
            BudgetCategory::Government => "Government",
        };
        f.write_str(label)
    }
}

impl FromStr for BudgetCategory {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(BudgetCategory::Personal),
            "business" => Ok(BudgetCategory::Business),
            "government" | "gov" => Ok(BudgetCategory::Government),
            other => Err(ParseLabelError::new("category", other)),
        }
    }
}

/// Which side of an entry a figure belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKind {
    Income,
    Expense,
    Saving,
}

impl BreakdownKind {
    pub const ALL: [BreakdownKind; 3] = [
        BreakdownKind::Income,
        BreakdownKind::Expense,
        BreakdownKind::Saving,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BreakdownKind::Income => "income",
            BreakdownKind::Expense => "expense",
            BreakdownKind::Saving => "saving",
        }
    }
}

impl fmt::Display for BreakdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BreakdownKind::Income => "Income",
            BreakdownKind::Expense => "Expenses",
            BreakdownKind::Saving => "Savings / Allocations",
        };
        f.write_str(label)
    }
}

impl FromStr for BreakdownKind {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "inc" => Ok(BreakdownKind::Income),
            "expense" | "expenses" | "exp" => Ok(BreakdownKind::Expense),
            "saving" | "savings" | "sav" => Ok(BreakdownKind::Saving),
            other => Err(ParseLabelError::new("breakdown kind", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a category or breakdown keyword is not recognised.
pub struct ParseLabelError {
    what: &'static str,
    value: String,
}

impl ParseLabelError {
    fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} `{}`", self.what, self.value)
    }
}

impl std::error::Error for ParseLabelError {}

/// Fixed income/expense/saving labels accepted for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelSet {
    pub income: Vec<String>,
    pub expense: Vec<String>,
    pub saving: Vec<String>,
}

impl LabelSet {
    pub fn new(income: &[&str], expense: &[&str], saving: &[&str]) -> Self {
        let owned = |labels: &[&str]| labels.iter().map(|label| label.to_string()).collect();
        Self {
            income: owned(income),
            expense: owned(expense),
            saving: owned(saving),
        }
    }

    pub fn labels(&self, kind: BreakdownKind) -> &[String] {
        match kind {
            BreakdownKind::Income => &self.income,
            BreakdownKind::Expense => &self.expense,
            BreakdownKind::Saving => &self.saving,
        }
    }

    /// Resolves a user-typed label to its canonical spelling (case-insensitive).
    pub fn canonical(&self, kind: BreakdownKind, label: &str) -> Option<&str> {
        let needle = label.trim();
        self.labels(kind)
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(needle))
            .map(String::as_str)
    }
}

/// Label sets for every category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelCatalog {
    pub personal: LabelSet,
    pub business: LabelSet,
    pub government: LabelSet,
}

impl LabelCatalog {
    pub fn for_category(&self, category: BudgetCategory) -> &LabelSet {
        match category {
            BudgetCategory::Personal => &self.personal,
            BudgetCategory::Business => &self.business,
            BudgetCategory::Government => &self.government,
        }
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self {
            personal: LabelSet::new(
                &["Salary", "Investments", "Other"],
                &["Housing", "Food", "Transport"],
                &["Emergency", "Retirement", "Other"],
            ),
            business: LabelSet::new(
                &["Product Sales", "Service Income", "Other"],
                &["Salaries", "Inventory", "Marketing"],
                &["R&D", "Growth Fund", "Reserves"],
            ),
            government: LabelSet::new(
                &["Tax Revenue", "Grants", "Borrowing"],
                &["Education", "Healthcare", "Infrastructure"],
                &["Development", "Defense", "Reserves"],
            ),
        }
    }
}
