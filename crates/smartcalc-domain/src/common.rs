//! Shared traits and small value types used across the domain.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for records stored in a ledger.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records that carry their creation instant.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Placeholder owner recorded for sessions that skipped sign-in.
pub const GUEST_OWNER: &str = "guest";

/// Identifies who submitted a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn guest() -> Self {
        Self(GUEST_OWNER.into())
    }

    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_OWNER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::guest()
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces absent or non-finite amounts with zero.
pub fn amount_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}
