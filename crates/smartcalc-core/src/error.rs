use smartcalc_domain::{BreakdownKind, BudgetCategory};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Unknown {} label `{label}` for {category}", .kind.key())]
    UnknownLabel {
        category: BudgetCategory,
        kind: BreakdownKind,
        label: String,
    },
    #[error("Sign-in failed: {0}")]
    Authentication(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
