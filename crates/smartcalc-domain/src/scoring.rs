//! Inputs, settings and results for the net-worth and audit scorers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Reference bounds for placing a net worth on the log scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NetWorthBounds {
    pub lower: f64,
    pub upper: f64,
    /// Net worth below which the standing is reported as still building.
    #[serde(default = "NetWorthBounds::default_building_threshold")]
    pub building_threshold: f64,
}

impl NetWorthBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            building_threshold: Self::default_building_threshold(),
        }
    }

    pub fn default_building_threshold() -> f64 {
        1_000_000.0
    }
}

impl Default for NetWorthBounds {
    fn default() -> Self {
        Self::new(-1_000_000.0, 200_000_000_000.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Coarse verdict shown alongside a net-worth score.
pub enum NetWorthStanding {
    InTheRed,
    Building,
    OnTrack,
}

impl NetWorthStanding {
    pub fn classify(net: f64, building_threshold: f64) -> Self {
        if net < 0.0 {
            NetWorthStanding::InTheRed
        } else if net < building_threshold {
            NetWorthStanding::Building
        } else {
            NetWorthStanding::OnTrack
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            NetWorthStanding::InTheRed => "You're in the red. Time to cut back on liabilities.",
            NetWorthStanding::Building => "Building wealth takes time. Keep saving and investing!",
            NetWorthStanding::OnTrack => "You're on your way to financial freedom!",
        }
    }
}

impl fmt::Display for NetWorthStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NetWorthStanding::InTheRed => "In the red",
            NetWorthStanding::Building => "Building",
            NetWorthStanding::OnTrack => "On track",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetWorthResult {
    pub assets: f64,
    pub liabilities: f64,
    pub net: f64,
    /// Log-scale placement between the configured bounds, always in `[0, 1]`.
    pub relative_position: f64,
    pub standing: NetWorthStanding,
}

/// Ratio cut-offs separating audit tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AuditThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for AuditThresholds {
    fn default() -> Self {
        Self {
            moderate: 1.2,
            high: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AuditTier {
    Normal,
    Moderate,
    High,
}

impl AuditTier {
    pub fn classify(ratio: f64, thresholds: &AuditThresholds) -> Self {
        if ratio > thresholds.high {
            AuditTier::High
        } else if ratio > thresholds.moderate {
            AuditTier::Moderate
        } else {
            AuditTier::Normal
        }
    }
}

impl fmt::Display for AuditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuditTier::Normal => "normal",
            AuditTier::Moderate => "moderate",
            AuditTier::High => "high",
        };
        f.write_str(label)
    }
}

/// Declared and observed figures for one audited subject.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditInput {
    pub declared_income: f64,
    pub declared_assets: f64,
    pub known_contracts: f64,
    pub claimed_spend: f64,
    pub estimated_assets: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditResult {
    pub declared_capacity: f64,
    pub apparent_total: f64,
    pub ratio: f64,
    pub tier: AuditTier,
    pub explained_amount: f64,
    pub unexplained_amount: f64,
}

/// An audit result as kept in a session's audit ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    #[serde(default)]
    pub owner: Owner,
    pub input: AuditInput,
    pub result: AuditResult,
}

impl Identifiable for AuditRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for AuditRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
